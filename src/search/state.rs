use crate::{Error, KEY_N, MAX_ROBOT_N, MAX_VERTEX_N};

/// Vertices the robots stand on.
///
/// Robots are interchangeable: only which vertices are occupied matters for the remaining
/// distance. The slots are kept sorted, so two sets holding the same vertices are equal no
/// matter which robot stands where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RobotSet {
    slots: [u8; MAX_ROBOT_N],
    len: u8,
}

impl RobotSet {
    pub fn new(vertices: &[usize]) -> Self {
        assert!(vertices.len() <= MAX_ROBOT_N);
        let mut slots = [0; MAX_ROBOT_N];
        for (slot, v) in slots.iter_mut().zip(vertices) {
            assert!(*v < MAX_VERTEX_N);
            *slot = *v as u8;
        }
        let mut set = Self {
            slots,
            len: vertices.len() as u8,
        };
        set.as_mut_slice().sort_unstable();
        set
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.slots[..self.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.as_slice().iter().map(|v| *v as usize)
    }

    /// Set after the robot in given slot walks to vertex `to`.
    pub fn moved(&self, slot: usize, to: usize) -> Self {
        assert!(slot < self.len() && to < MAX_VERTEX_N);
        let mut next = *self;
        next.slots[slot] = to as u8;
        next.as_mut_slice().sort_unstable();
        next
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.slots[..len]
    }
}

/// Packs search states into `u64` identities.
///
/// Each robot takes a field of `field_bits` bits in the robot code, slot 0 in the lowest bits.
/// The identity is the robot code shifted above the 26 bits of collected keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCodec {
    robot_n: usize,
    field_bits: u32,
}

impl StateCodec {
    pub fn new(robot_n: usize, vertex_n: usize) -> Result<Self, Error> {
        if robot_n == 0 || robot_n > MAX_ROBOT_N {
            return Err(Error::InvalidRobotCount(robot_n));
        }
        if vertex_n > MAX_VERTEX_N {
            return Err(Error::TooManyVertices(vertex_n));
        }

        let field_bits = (usize::BITS - vertex_n.saturating_sub(1).leading_zeros()).max(1);
        assert!(field_bits as usize * robot_n + KEY_N <= u64::BITS as usize);

        Ok(Self {
            robot_n,
            field_bits,
        })
    }

    pub fn field_bits(&self) -> u32 {
        self.field_bits
    }

    pub fn encode_robots(&self, robots: &RobotSet) -> u64 {
        debug_assert_eq!(robots.len(), self.robot_n);
        robots
            .iter()
            .enumerate()
            .fold(0, |code, (slot, v)| {
                debug_assert!(v < 1 << self.field_bits);
                code | (v as u64) << (slot as u32 * self.field_bits)
            })
    }

    pub fn decode_robots(&self, code: u64) -> RobotSet {
        let mask = (1u64 << self.field_bits) - 1;
        let mut vertices = [0; MAX_ROBOT_N];
        for (slot, v) in vertices.iter_mut().take(self.robot_n).enumerate() {
            *v = ((code >> (slot as u32 * self.field_bits)) & mask) as usize;
        }
        RobotSet::new(&vertices[..self.robot_n])
    }

    pub fn state_id(&self, robots: &RobotSet, keys: u32) -> u64 {
        debug_assert!(keys >> KEY_N == 0);
        self.encode_robots(robots) << KEY_N | keys as u64
    }

    pub fn split_state_id(&self, id: u64) -> (RobotSet, u32) {
        let keys = (id & ((1 << KEY_N) - 1)) as u32;
        (self.decode_robots(id >> KEY_N), keys)
    }
}
