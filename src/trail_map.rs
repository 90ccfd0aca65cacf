/// Pending wavefront elements bucketed by integer distance.
///
/// Elements are popped in non-decreasing distance order; within one bucket the
/// most recently pushed element comes out first. Pushes must never go below the
/// bucket currently being drained.
pub struct TrailMap<T> {
    buckets: Vec<Vec<T>>,
    cursor: usize,
    len: usize,
}

impl<T> TrailMap<T> {
    /// Pre-allocates buckets for distances `0..=max_dist`.
    pub fn with_max_distance(max_dist: u32) -> Self {
        let mut buckets = Vec::with_capacity(max_dist as usize + 1);
        buckets.resize_with(max_dist as usize + 1, Vec::new);
        Self {
            buckets,
            cursor: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, dist: u32, value: T) {
        let d = dist as usize;
        assert!(
            d >= self.cursor,
            "push at distance {d} behind the active bucket {}",
            self.cursor
        );
        if d >= self.buckets.len() {
            self.buckets.resize_with(d + 1, Vec::new);
        }
        self.buckets[d].push(value);
        self.len += 1;
    }

    /// Removes the element with the smallest pending distance.
    #[inline]
    pub fn pop(&mut self) -> Option<(u32, T)> {
        if self.len == 0 {
            return None;
        }
        while self.cursor < self.buckets.len() {
            if let Some(value) = self.buckets[self.cursor].pop() {
                self.len -= 1;
                return Some((self.cursor as u32, value));
            }
            self.cursor += 1;
        }
        None
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every pending element, keeping bucket capacity for the next round.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.cursor = 0;
        self.len = 0;
    }
}

impl<T> Default for TrailMap<T> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
            cursor: 0,
            len: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_by_distance_then_lifo() {
        let mut tm: TrailMap<char> = TrailMap::default();
        tm.push(0, 'a');
        tm.push(2, 'x');
        tm.push(0, 'b');
        tm.push(1, 'c');
        assert!(!tm.is_empty());

        assert_eq!(tm.pop(), Some((0, 'b')));
        assert_eq!(tm.pop(), Some((0, 'a')));
        tm.push(1, 'd');
        assert_eq!(tm.pop(), Some((1, 'd')));
        assert_eq!(tm.pop(), Some((1, 'c')));
        assert_eq!(tm.pop(), Some((2, 'x')));
        assert_eq!(tm.pop(), None);
        assert!(tm.is_empty());
    }

    #[test]
    fn clear_rewinds_for_next_round() {
        let mut tm: TrailMap<u32> = TrailMap::with_max_distance(3);
        tm.push(0, 1);
        tm.push(3, 2);
        assert_eq!(tm.pop(), Some((0, 1)));
        tm.clear();
        assert!(tm.is_empty());
        assert_eq!(tm.pop(), None);

        tm.push(0, 7);
        assert_eq!(tm.pop(), Some((0, 7)));
    }

    #[test]
    #[should_panic(expected = "behind the active bucket")]
    fn push_behind_cursor_panics() {
        let mut tm: TrailMap<u8> = TrailMap::default();
        tm.push(2, 0);
        tm.pop();
        tm.push(1, 0);
    }
}
