use std::fs;

use vault_robots::{Error, KeyGraph, VaultMap};

fn rows_of(path: &str) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .take_while(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn min_steps_n<S: AsRef<str>>(rows: &[S], robot_n: usize) -> Option<usize> {
    let map = VaultMap::try_from_lines(rows.iter().map(|r| r.as_ref())).unwrap();
    vault_robots::min_collect_steps_in_map(&map, robot_n).unwrap()
}

// Exhaustive search over every order of keys and every robot choice on a map without walls.
fn open_map_brute_force(robots: &mut [(usize, usize)], keys: &mut Vec<(usize, usize)>) -> usize {
    if keys.is_empty() {
        return 0;
    }

    let mut min = usize::MAX;
    for key_ind in 0..keys.len() {
        let key = keys.remove(key_ind);
        for robot_ind in 0..robots.len() {
            let robot = robots[robot_ind];
            let steps_n = robot.0.abs_diff(key.0) + robot.1.abs_diff(key.1);
            robots[robot_ind] = key;
            min = min.min(steps_n + open_map_brute_force(robots, keys));
            robots[robot_ind] = robot;
        }
        keys.insert(key_ind, key);
    }

    min
}

#[test]
fn four_entrances_examples() {
    for (path, expect) in [
        ("tests/data/four_entrances_small.txt", 8),
        ("tests/data/four_entrances_doors.txt", 24),
        ("tests/data/four_entrances_mixed.txt", 32),
        ("tests/data/four_entrances_large.txt", 72),
    ] {
        assert_eq!(min_steps_n(&rows_of(path), 4), Some(expect), "{}", path);
    }
}

#[test]
fn single_entrance_examples() {
    let maps: [(&[&str], usize); 5] = [
        (&["#########", "#b.A.@.a#", "#########"], 8),
        (
            &[
                "########################",
                "#f.D.E.e.C.b.A.@.a.B.c.#",
                "######################.#",
                "#d.....................#",
                "########################",
            ],
            86,
        ),
        (
            &[
                "########################",
                "#...............b.C.D.f#",
                "#.######################",
                "#.....@.a.B.c.d.A.e.F.g#",
                "########################",
            ],
            132,
        ),
        (
            &[
                "#################",
                "#i.G..c...e..H.p#",
                "########.########",
                "#j.A..b...f..D.o#",
                "########@########",
                "#k.E..a...g..B.n#",
                "########.########",
                "#l.F..d...h..C.m#",
                "#################",
            ],
            136,
        ),
        (
            &[
                "########################",
                "#@..............ac.GI.b#",
                "###d#e#f################",
                "###A#B#C################",
                "###g#h#i################",
                "########################",
            ],
            81,
        ),
    ];
    for (rows, expect) in maps {
        assert_eq!(min_steps_n(rows, 1), Some(expect));
    }
}

#[test]
fn split_entrance_example() {
    let rows = rows_of("tests/data/single_entrance.txt");
    let mut map = VaultMap::try_from_lines(rows.iter().map(String::as_str)).unwrap();
    map.split_entrance().unwrap();
    assert_eq!(vault_robots::min_collect_steps_in_map(&map, 4).unwrap(), Some(24));
}

#[test]
fn no_keys_needs_no_steps() {
    assert_eq!(min_steps_n(&rows_of("tests/data/no_keys.txt"), 4), Some(0));
    assert_eq!(min_steps_n(&["@"], 1), Some(0));
}

#[test]
fn single_key_in_a_row() {
    assert_eq!(min_steps_n(&["@...a"], 1), Some(4));
}

#[test]
fn door_forces_key_order() {
    // Walking to both keys directly would take 2 + 4 steps, but door A needs key a first.
    assert_eq!(min_steps_n(&["#########", "#b.A.@.a#", "#########"], 1), Some(8));
}

#[test]
fn door_forces_detour_to_farther_key() {
    // Key a is 5 steps away, key b only 4, but b sits behind door A.
    assert_eq!(min_steps_n(&["#a....@.A.b#"], 1), Some(5 + 9));
    assert_eq!(min_steps_n(&["#b.A.@....a#"], 1), Some(5 + 9));
}

#[test]
fn equal_ways_prefer_fewer_doors() {
    let maps: [(&[&str], usize); 2] = [
        (&["#####", "#@A.#", "#..a#", "#####"], 3),
        (&["####", "#@A#", "#.a#", "####"], 2),
    ];
    for (rows, expect) in maps {
        let mirrored = rows
            .iter()
            .map(|r| r.chars().rev().collect::<String>())
            .collect::<Vec<_>>();
        let flipped = rows.iter().rev().copied().collect::<Vec<_>>();
        assert_eq!(min_steps_n(rows, 1), Some(expect), "{:?}", rows);
        assert_eq!(min_steps_n(&mirrored, 1), Some(expect), "{:?}", mirrored);
        assert_eq!(min_steps_n(&flipped, 1), Some(expect), "{:?}", flipped);
    }

    // Walling the door off must not make the vault any cheaper.
    assert_eq!(min_steps_n(&["#####", "#@#.#", "#..a#", "#####"], 1), Some(3));
}

#[test]
fn walled_off_key_has_no_solution() {
    assert_eq!(min_steps_n(&rows_of("tests/data/walled_off_key.txt"), 4), None);
    assert_eq!(min_steps_n(&["#@#a"], 1), None);
}

#[test]
fn door_without_key_blocks_forever() {
    assert_eq!(min_steps_n(&["#@.Z.a#"], 1), None);
    assert_eq!(min_steps_n(&["#a.@.Z.#"], 1), Some(2));
}

#[test]
fn disjoint_robots_add_up() {
    let rows = ["#######", "#a.@.b#", "#######", "#c.@..#", "#######"];
    assert_eq!(min_steps_n(&rows, 2), Some(6 + 2));
    assert_eq!(min_steps_n(&["a.@.b.@.c"], 2), Some(6));
}

#[test]
fn open_maps_match_brute_force() {
    let maps: [&[&str]; 5] = [
        &["@...a", ".....", "b...@"],
        &["a....", "..@..", "....b", "@...c"],
        &["@.a.@", ".....", "c...b", "@.d.@"],
        &["ab...", "@....", "....@", "...dc"],
        &["@....c", "......", "..a...", "b....@", "@...d@"],
    ];
    for rows in maps {
        let mut robots = Vec::new();
        let mut keys = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    '@' => robots.push((r, c)),
                    'a'..='z' => keys.push((r, c)),
                    _ => {}
                }
            }
        }

        let expect = open_map_brute_force(&mut robots, &mut keys);
        assert_eq!(min_steps_n(rows, robots.len()), Some(expect), "{:?}", rows);
    }
}

#[test]
fn search_is_repeatable() {
    let rows = rows_of("tests/data/four_entrances_large.txt");
    let map = VaultMap::try_from_lines(rows.iter().map(String::as_str)).unwrap();
    let graph = KeyGraph::from_map(&map).unwrap();
    let first = vault_robots::min_collect_steps_with_stats(&graph, 4).unwrap();
    let second = vault_robots::min_collect_steps_with_stats(&graph, 4).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.0, Some(72));
    assert!(first.1.popped_n <= first.1.pushed_n + 1);
}

#[test]
fn mirrored_maps_need_the_same_steps() {
    let rows = rows_of("tests/data/four_entrances_large.txt");
    let mirrored = rows
        .iter()
        .map(|r| r.chars().rev().collect::<String>())
        .collect::<Vec<_>>();
    let flipped = rows.iter().rev().cloned().collect::<Vec<_>>();
    assert_eq!(min_steps_n(&mirrored, 4), Some(72));
    assert_eq!(min_steps_n(&flipped, 4), Some(72));
}

#[test]
fn removing_doors_never_costs_more() {
    for (path, with_doors) in [
        ("tests/data/four_entrances_doors.txt", 24),
        ("tests/data/four_entrances_mixed.txt", 32),
    ] {
        let open_rows = rows_of(path)
            .iter()
            .map(|r| {
                r.chars()
                    .map(|c| if c.is_ascii_uppercase() { '.' } else { c })
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert!(min_steps_n(&open_rows, 4).unwrap() <= with_doors);
    }
}

#[test]
fn adding_walls_never_costs_less() {
    let rows = ["#######", "#@...a#", "#.###.#", "#.....#", "#######"];
    assert_eq!(min_steps_n(&rows, 1), Some(4));

    // Unused detour walled off.
    let rows = ["#######", "#@...a#", "#.#####", "#.#####", "#######"];
    assert_eq!(min_steps_n(&rows, 1), Some(4));

    // Shortest way walled off.
    let rows = ["#######", "#@.#.a#", "#.###.#", "#.....#", "#######"];
    assert_eq!(min_steps_n(&rows, 1), Some(8));
}

#[test]
fn robot_count_must_match_entrances() {
    let rows = rows_of("tests/data/four_entrances_small.txt");
    let map = VaultMap::try_from_lines(rows.iter().map(String::as_str)).unwrap();
    let graph = KeyGraph::from_map(&map).unwrap();
    assert!(matches!(
        vault_robots::min_collect_steps(&graph, 3),
        Err(Error::EntranceCountMismatch {
            expected: 3,
            found: 4
        })
    ));
    assert!(matches!(
        vault_robots::min_collect_steps(&graph, 0),
        Err(Error::InvalidRobotCount(0))
    ));
    assert!(matches!(
        vault_robots::min_collect_steps(&graph, 8),
        Err(Error::InvalidRobotCount(8))
    ));
}
