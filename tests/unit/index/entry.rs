//! Tests for corpus entries and their cooldown counters

#[cfg(test)]
mod tests {
    use crate::entry;
    use photomosaic::index::{EntryId, Signature};

    // Tests handles report the position they were created with
    // Verified by offsetting positions
    #[test]
    fn test_entry_id_position() {
        assert_eq!(EntryId::new(7).position(), 7);
        assert!(EntryId::new(1) < EntryId::new(2));
    }

    // Tests new entries start without cooldown or cached rendering
    // Verified by seeding the cooldown with one
    #[test]
    fn test_new_entry_state() {
        let e = entry("a.png", [10, 20, 30]);

        assert_eq!(e.identifier(), "a.png");
        assert_eq!(e.luma_chroma(), Signature::new(10, 20, 30));
        assert_eq!(e.cooldown(), 0);
        assert!(e.cached_rendering().is_none());
    }

    // Tests a cooling entry is eligible exactly on the tick that reaches zero
    // Verified by decrementing after the eligibility check
    #[test]
    fn test_tick_cooldown() {
        let mut e = entry("a.png", [0, 0, 0]);
        e.set_cooldown(3);

        assert!(!e.tick_cooldown());
        assert_eq!(e.cooldown(), 2);
        assert!(!e.tick_cooldown());
        assert!(e.tick_cooldown());
        assert_eq!(e.cooldown(), 0);

        // Idle entries stay eligible and never underflow
        assert!(e.tick_cooldown());
        assert_eq!(e.cooldown(), 0);
    }
}
