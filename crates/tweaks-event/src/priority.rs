/// Listener priority tier.
///
/// Tiers run from [`Priority::Lowest`] to [`Priority::Monitor`]. A listener
/// that must decide before anyone else acts on an event (for example,
/// rejecting it outright) registers at `Lowest`. `Monitor` listeners observe
/// the final state and should not mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
    Monitor,
}

impl Priority {
    /// All tiers in dispatch order.
    pub const ALL: [Self; 6] = [
        Self::Lowest,
        Self::Low,
        Self::Normal,
        Self::High,
        Self::Highest,
        Self::Monitor,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        let mut sorted = Priority::ALL;
        sorted.sort();
        assert_eq!(sorted, Priority::ALL);
        assert!(Priority::Lowest < Priority::Monitor);
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
    }
}
