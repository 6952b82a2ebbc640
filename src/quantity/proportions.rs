quantity!(Percentage, suffix: "%", precision: 2);

impl Percentage {
    pub const HUNDRED: Self = Self(100.0);

    /// Convert the percentage into a ratio, `100 %` being `1.0`.
    #[must_use]
    pub fn to_ratio(self) -> f64 {
        0.01 * self.0
    }

    /// Whether the percentage lies within `0..=100`.
    #[must_use]
    pub fn is_proportion(self) -> bool {
        self.is_non_negative() && self <= Self::HUNDRED
    }
}
