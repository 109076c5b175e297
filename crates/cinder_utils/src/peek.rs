pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    /// Looks `n` items past the next one without consuming anything.
    /// `peek_nth(0)` is the same as `peek()`.
    fn peek_nth(&self, n: usize) -> Option<Self::Item>
    where
        Self: Clone,
    {
        self.clone().nth(n)
    }
}
