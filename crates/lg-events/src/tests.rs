//! Unit tests for the event queue and clock.

#[cfg(test)]
mod queue {
    use lg_core::SimTime;
    use crate::EventQueue;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(SimTime(5.0), "c");
        q.push(SimTime(1.0), "a");
        q.push(SimTime(3.0), "b");
        assert_eq!(q.next_time(), Some(SimTime(1.0)));
        let order: Vec<_> = std::iter::from_fn(|| q.pop_next()).map(|(_, e)| e).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn same_instant_keeps_schedule_order() {
        let mut q = EventQueue::new();
        for i in 0..5 {
            q.push(SimTime(2.0), i);
        }
        let order: Vec<i32> = std::iter::from_fn(|| q.pop_next()).map(|(_, e)| e).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cancel_removes_only_that_event() {
        let mut q = EventQueue::new();
        let a = q.push(SimTime(1.0), 'a');
        let b = q.push(SimTime(1.0), 'b');
        assert_eq!(q.cancel(a), Some('a'));
        assert_eq!(q.cancel(a), None);
        assert!(q.contains(b));
        assert_eq!(q.len(), 1);
    }
}

#[cfg(test)]
mod clock {
    use lg_core::{SimDuration, SimTime};
    use crate::{Clock, EventClock, EventError};

    #[test]
    fn advance_moves_now() {
        let mut c = EventClock::new(SimTime(10.0));
        c.schedule_after(SimDuration(2.5), 1u8).unwrap();
        assert_eq!(c.now(), SimTime(10.0));
        assert_eq!(c.advance(), Some((SimTime(12.5), 1)));
        assert_eq!(c.now(), SimTime(12.5));
        assert_eq!(c.advance(), None);
    }

    #[test]
    fn rejects_past_and_infinite() {
        let mut c = EventClock::new(SimTime(10.0));
        assert!(matches!(c.schedule_at(SimTime(9.0), ()), Err(EventError::InPast { .. })));
        assert!(matches!(c.schedule_at(SimTime::INFINITY, ()), Err(EventError::NotFinite(_))));
        assert!(c.schedule_at(SimTime(10.0), ()).is_ok());
    }

    #[test]
    fn advance_until_respects_limit() {
        let mut c = EventClock::new(SimTime::ZERO);
        c.schedule_at(SimTime(4.0), 'x').unwrap();
        assert_eq!(c.advance_until(SimTime(3.0)), None);
        assert_eq!(c.now(), SimTime::ZERO);
        assert_eq!(c.advance_until(SimTime(4.0)), Some((SimTime(4.0), 'x')));
    }

    #[test]
    fn cancel_through_trait_object() {
        let mut c = EventClock::new(SimTime::ZERO);
        let h = {
            let dyn_clock: &mut dyn Clock<u32> = &mut c;
            dyn_clock.schedule_after(SimDuration(1.0), 7).unwrap()
        };
        assert!(c.cancel(h));
        assert!(!c.cancel(h));
        assert_eq!(c.pending(), 0);
    }
}
