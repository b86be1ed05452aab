use ringtap::{BufferError, DelayLine};

#[test]
fn test_delay_correctness() {
    for delay_samples in [0usize, 1, 3, 7, 14] {
        let mut delay = DelayLine::new(delay_samples, 16).unwrap();
        let inputs: Vec<i64> = (1..=50).collect();

        let outputs: Vec<i64> = inputs
            .iter()
            .map(|&s| {
                delay.insert(s);
                delay.read().unwrap()
            })
            .collect();

        assert!(
            outputs[..delay_samples].iter().all(|&s| s == 0),
            "priming outputs must be zero for delay {}",
            delay_samples
        );
        assert_eq!(
            &outputs[delay_samples..],
            &inputs[..inputs.len() - delay_samples],
            "delay {} misordered samples",
            delay_samples
        );
    }
}

#[test]
fn test_underrun_sequence() {
    let mut delay = DelayLine::<f32>::new(0, 256).unwrap();
    assert!(matches!(delay.read(), Err(BufferError::BufferUnderrun)));

    delay.insert(0.0);
    assert_eq!(delay.read().unwrap(), 0.0);
    assert!(matches!(delay.read(), Err(BufferError::BufferUnderrun)));
}

#[test]
fn test_reads_drain_priming_then_underrun() {
    let mut delay = DelayLine::<f64>::new(3, 8).unwrap();
    for _ in 0..3 {
        assert_eq!(delay.read().unwrap(), 0.0);
    }
    assert!(matches!(delay.read(), Err(BufferError::BufferUnderrun)));
    assert_eq!(delay.available(), 0);
}

#[test]
fn test_burst_insert_then_drain_keeps_order() {
    let mut delay = DelayLine::new(2, 16).unwrap();
    for s in 1..=5 {
        delay.insert(s);
    }
    assert_eq!(delay.available(), 7);

    let drained: Vec<i32> = std::iter::from_fn(|| delay.read().ok()).collect();
    assert_eq!(drained, vec![0, 0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_invalid_delay() {
    assert!(matches!(
        DelayLine::<f32>::new(8, 8),
        Err(BufferError::InvalidDelay {
            delay: 8,
            capacity: 8
        })
    ));
    assert!(matches!(
        DelayLine::<f32>::new(20, 8),
        Err(BufferError::InvalidDelay { .. })
    ));
}

#[test]
fn test_clear_keeps_pointers() {
    let mut delay = DelayLine::new(2, 8).unwrap();
    delay.insert(1.0);
    delay.insert(2.0);
    let (read_ptr, write_ptr) = (delay.read_ptr(), delay.write_ptr());

    delay.clear();
    delay.clear();

    assert_eq!(delay.read_ptr(), read_ptr);
    assert_eq!(delay.write_ptr(), write_ptr);
    assert_eq!(delay.available(), 4);
    assert!(delay.buffer().as_slice().iter().all(|&s| s == 0.0));
}

#[test]
fn test_non_power_of_two_capacity() {
    let mut delay = DelayLine::new(4, 10).unwrap();
    let mut samples: Vec<i32> = (1..=30).collect();
    delay.process_buffer(&mut samples).unwrap();

    assert_eq!(&samples[..4], &[0, 0, 0, 0]);
    assert_eq!(samples[4], 1);
    assert_eq!(samples[29], 26);
}
