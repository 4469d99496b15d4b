//! Unit tests for SMA indicator

use crate::support::{assert_approx, series, series_from_fn, DEFAULT_EPSILON};
use strike_dca::indicators::trend::{calculate_sma, latest_sma};

#[test]
fn test_sma_simple_data() {
    let samples = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(calculate_sma(&samples, 3), vec![2.0, 3.0, 4.0]);
}

#[test]
fn test_sma_constant_prices() {
    let samples = series_from_fn(10, |_| 5.0);
    assert_eq!(calculate_sma(&samples, 5), vec![5.0; 6]);
}

#[test]
fn test_sma_insufficient_data() {
    let samples = series(&[1.0, 2.0]);
    for period in 3..=20 {
        assert!(calculate_sma(&samples, period).is_empty(), "period {period}");
    }
    assert!(calculate_sma(&[], 1).is_empty());
}

#[test]
fn test_sma_period_equal_to_length() {
    let samples = series(&[10.0, 20.0, 30.0, 40.0]);
    let sma = calculate_sma(&samples, 4);
    assert_eq!(sma.len(), 1);
    assert_approx(sma[0], 25.0, DEFAULT_EPSILON);
}

#[test]
fn test_sma_period_one_is_price() {
    let samples = series(&[100.0, 200.0, 300.0]);
    assert_eq!(calculate_sma(&samples, 1), vec![100.0, 200.0, 300.0]);
}

#[test]
fn test_sma_zero_period_is_empty() {
    let samples = series(&[1.0, 2.0, 3.0]);
    assert!(calculate_sma(&samples, 0).is_empty());
}

#[test]
fn test_sma_output_length() {
    let samples = series_from_fn(50, |i| i as f64);
    for period in 1..=60 {
        let expected = (50 + 1usize).saturating_sub(period);
        assert_eq!(calculate_sma(&samples, period).len(), expected, "period {period}");
    }
}

#[test]
fn test_latest_sma() {
    let samples = series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
    let sma = latest_sma(&samples, 5).expect("enough data");
    assert_eq!(sma.period, 5);
    assert_approx(sma.value, 14.0, DEFAULT_EPSILON);

    assert!(latest_sma(&samples, 8).is_none());
}
