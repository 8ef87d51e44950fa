/// Binary min-heap ordered by distance only. Entries with equal distance pop in no particular
/// order, and there is no decrease-key: callers push again and skip stale entries on pop.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    data: Vec<(usize, T)>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn peek_dist(&self) -> Option<usize> {
        self.data.first().map(|(dist, _)| *dist)
    }

    pub fn push(&mut self, dist: usize, item: T) {
        self.data.push((dist, item));
        let mut ind = self.data.len() - 1;
        while ind > 0 {
            let parent = (ind - 1) / 2;
            if self.data[parent].0 <= self.data[ind].0 {
                break;
            }
            self.data.swap(parent, ind);
            ind = parent;
        }
    }

    pub fn pop(&mut self) -> Option<(usize, T)> {
        if self.data.is_empty() {
            return None;
        }

        let last_ind = self.data.len() - 1;
        self.data.swap(0, last_ind);
        let min = self.data.pop();
        let len = self.data.len();
        let mut ind = 0;
        loop {
            let left = 2 * ind + 1;
            let right = left + 1;
            let mut smallest = ind;
            if left < len && self.data[left].0 < self.data[smallest].0 {
                smallest = left;
            }
            if right < len && self.data[right].0 < self.data[smallest].0 {
                smallest = right;
            }
            if smallest == ind {
                break;
            }
            self.data.swap(ind, smallest);
            ind = smallest;
        }

        min
    }
}
