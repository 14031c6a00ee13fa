//! Property tests for heap consistency and the exactness of the
//! time-rescaling formula, via `proptest`.

use nrm_core::IndexedMinHeap;
use proptest::prelude::*;

fn is_valid_min_heap(times: &[f64], heap: &IndexedMinHeap<f64>) -> bool {
    let (min_time, min_id) = heap.peek_min();
    for id in 0..times.len() {
        let scheduled = heap.read(id).unwrap();
        if scheduled < min_time {
            return false;
        }
        if scheduled == min_time && id < min_id {
            return false;
        }
    }
    true
}

proptest! {
    /// After any sequence of updates, peek_next's time equals the true
    /// minimum over all channels, and the position index stays consistent
    /// with the heap array.
    #[test]
    fn heap_consistency_after_random_updates(
        initial in prop::collection::vec(0.0f64..100.0, 2..20),
        updates in prop::collection::vec((0usize..20, 0.0f64..100.0), 0..50),
    ) {
        let n = initial.len();
        let mut heap = IndexedMinHeap::build(initial.clone());
        let mut shadow = initial;
        for (raw_id, new_time) in updates {
            let id = raw_id % n;
            heap.update(id, new_time).unwrap();
            shadow[id] = new_time;
        }
        prop_assert!(is_valid_min_heap(&shadow, &heap));
    }

    /// Setting a channel's rate to zero (time -> +infinity) is accepted and
    /// preserves heap consistency.
    #[test]
    fn heap_accepts_infinities(
        initial in prop::collection::vec(0.0f64..100.0, 2..10),
        zeroed in prop::collection::vec(any::<bool>(), 2..10),
    ) {
        let n = initial.len().min(zeroed.len());
        let mut heap = IndexedMinHeap::build(initial[..n].to_vec());
        let mut shadow = initial[..n].to_vec();
        for (id, zero) in zeroed.into_iter().take(n).enumerate() {
            if zero {
                heap.update(id, f64::INFINITY).unwrap();
                shadow[id] = f64::INFINITY;
            }
        }
        prop_assert!(is_valid_min_heap(&shadow, &heap));
    }

    /// For r, r' > 0, the rescale formula is exact (within floating point)
    /// to t + (r/r') * (old_time - t).
    #[test]
    fn rescale_existing_matches_closed_form(
        t in 0.0f64..1000.0,
        old_rate in 1e-6f64..1e6,
        new_rate in 1e-6f64..1e6,
        wait in 0.0f64..1000.0,
    ) {
        let tau_old = t + wait;
        let got = nrm_core::time::rescale_existing(t, old_rate, new_rate, tau_old);
        let expected = t + (old_rate / new_rate) * (tau_old - t);
        prop_assert_eq!(got, expected);
    }
}
