//! Linear per-rank stat scaling.

/// Numeric stat types that scale linearly with the evolution stage.
pub trait RankScaled: Copy {
    fn scaled(base: Self, per_rank: Self, stage: u32) -> Self;
}

macro_rules! rank_scaled {
    ($($t:ty),*) => {
        $(
            impl RankScaled for $t {
                fn scaled(base: Self, per_rank: Self, stage: u32) -> Self {
                    base + per_rank * stage as $t
                }
            }
        )*
    };
}

rank_scaled!(i32, f32, f64);

/// `base + per_rank * stage`.
pub fn stat_at<T: RankScaled>(base: T, per_rank: T, stage: u32) -> T {
    T::scaled(base, per_rank, stage)
}
