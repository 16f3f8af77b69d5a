//! Unit tests for lg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{GtuId, LaneId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = LaneId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(LaneId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(GtuId::default(), GtuId::INVALID);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(GtuId(7).to_string(), "GtuId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{RunConfig, SimDuration, SimTime};

    #[test]
    fn arithmetic() {
        let t = SimTime(10.0) + SimDuration(2.5);
        assert_eq!(t, SimTime(12.5));
        assert_eq!((t - SimTime(10.0)).secs(), 2.5);
    }

    #[test]
    fn infinity_sorts_last() {
        let mut v = vec![SimTime::INFINITY, SimTime(3.0), SimTime(-1.0)];
        v.sort();
        assert_eq!(v, vec![SimTime(-1.0), SimTime(3.0), SimTime::INFINITY]);
        assert!(!SimTime::INFINITY.is_finite());
    }

    #[test]
    fn nan_rejected() {
        assert!(SimTime::from_secs(f64::NAN).is_err());
        assert!(SimTime::from_secs(1.0).is_ok());
    }

    #[test]
    fn run_config_window() {
        let cfg = RunConfig { seed: 1, start_time: SimTime(5.0), end_time: SimTime(2.0) };
        assert!(cfg.validate().is_err());
        let cfg = RunConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.duration().secs(), 3_600.0);
    }
}

#[cfg(test)]
mod direction {
    use crate::Direction;

    #[test]
    fn travelled_against_design_line() {
        assert_eq!(Direction::Plus.travelled(30.0, 100.0), 30.0);
        assert_eq!(Direction::Minus.travelled(30.0, 100.0), 70.0);
        assert_eq!(Direction::Minus.offset_at(70.0, 100.0), 30.0);
        assert_eq!(Direction::Plus.flip(), Direction::Minus);
    }
}

#[cfg(test)]
mod rng {
    use assert_approx_eq::assert_approx_eq;
    use rand::Rng;

    use crate::{AsRng, RandomSource, ScriptedSource, StreamRng};

    #[test]
    fn same_seed_same_stream() {
        let mut a = StreamRng::new(7, 3);
        let mut b = StreamRng::new(7, 3);
        for _ in 0..16 {
            assert_eq!(a.next_uniform(), b.next_uniform());
        }
    }

    #[test]
    fn streams_differ() {
        let mut a = StreamRng::new(7, 0);
        let mut b = StreamRng::new(7, 1);
        let xs: Vec<f64> = (0..4).map(|_| a.next_uniform()).collect();
        let ys: Vec<f64> = (0..4).map(|_| b.next_uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn uniforms_in_unit_interval() {
        let mut r = StreamRng::new(99, 0);
        for _ in 0..1000 {
            let u = r.next_uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn scripted_cycles() {
        let mut s = ScriptedSource::new(vec![0.1, 0.9]);
        assert_eq!(s.next_uniform(), 0.1);
        assert_eq!(s.next_uniform(), 0.9);
        assert_eq!(s.next_uniform(), 0.1);
        assert_eq!(s.draws(), 3);
    }

    #[test]
    fn as_rng_reproduces_uniform() {
        let mut s = ScriptedSource::new(vec![0.25, 0.7312]);
        let mut rng = AsRng(&mut s);
        assert_approx_eq!(rng.r#gen::<f64>(), 0.25, 1e-12);
        assert_approx_eq!(rng.r#gen::<f64>(), 0.7312, 1e-12);
    }
}
