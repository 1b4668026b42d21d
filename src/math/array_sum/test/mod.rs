//! Tests for the array sum variants.

use super::*;
use crate::utils::tester::TestCaseGenerator;

fn all_sums<T: Element>(input: &[T]) -> Vec<(&'static str, T)> {
    code::available_variants::<T>()
        .iter()
        .map(|v| (v.name, (v.function)(input)))
        .collect()
}

#[test]
fn test_sequential_generator() {
    let input = ArraySumGenerator::<f64>::new(5, Fill::Sequential).generate(123);
    assert_eq!(input, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_random_generator_depends_on_seed() {
    let gen = ArraySumGenerator::<i64>::new(256, Fill::Random);
    assert_eq!(gen.generate(1), gen.generate(1));
    assert_ne!(gen.generate(1), gen.generate(2));
}

#[test]
fn test_lab_size_sum() {
    // 0 + 1 + ... + 9999
    let input = ArraySumGenerator::<f64>::new(10_000, Fill::Sequential).generate(0);
    for (name, sum) in all_sums(&input) {
        assert_eq!(sum, 49_995_000.0, "{}", name);
    }
}

#[test]
fn test_empty() {
    for (name, sum) in all_sums::<i32>(&[]) {
        assert_eq!(sum, 0, "{}", name);
    }
}

#[test]
fn test_single() {
    for (name, sum) in all_sums(&[42i64]) {
        assert_eq!(sum, 42, "{}", name);
    }
}

#[test]
fn test_odd_length_keeps_trailing_element() {
    let input = [1i32, 2, 3, 4, 5, 6, 7];
    assert_eq!(sum_two_way_chain(&input), 28);
    assert_eq!(sum_recursive(&input), 28);
}

#[test]
fn test_i32_overflow_wraps_in_every_variant() {
    // 0 + 1 + ... + 99_999 = 4_999_950_000, past i32::MAX
    let input = ArraySumGenerator::<i32>::new(100_000, Fill::Sequential).generate(0);
    let expected = (4_999_950_000i64 as u64 as u32) as i32;
    assert_eq!(expected, 704_982_704);
    for (name, sum) in all_sums(&input) {
        assert_eq!(sum, expected, "{}", name);
    }
}

#[test]
fn test_unsigned_jobs_on_large_input() {
    let config = RunConfig {
        size: 100_000,
        repeat: 1,
        element: ElementType::U32,
        output_root: None,
        ..RunConfig::default()
    };
    let jobs = ArraySumRunner.variant_jobs(&config).unwrap();
    let expected = 4_999_950_000u64 as u32;
    for mut job in jobs {
        assert_eq!(job.result_sample, Some(expected as f64), "{}", job.name);
        assert_eq!((job.run)(None).unwrap().repeat(), 1);
    }
}

#[test]
fn test_registry_verify() {
    ArraySumRunner.verify().unwrap();
}

#[test]
fn test_jobs_follow_element_type() {
    let config = RunConfig {
        size: 11,
        repeat: 2,
        element: ElementType::I32,
        output_root: None,
        ..RunConfig::default()
    };
    let jobs = ArraySumRunner.variant_jobs(&config).unwrap();
    assert_eq!(jobs.len(), 3);
    for job in jobs {
        assert_eq!(job.result_sample, Some(55.0));
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn integer_variants_agree(values in proptest::collection::vec(-1_000_000i64..1_000_000, 0..600)) {
            let expected = sum_trivial(&values);
            prop_assert_eq!(sum_two_way_chain(&values), expected);
            prop_assert_eq!(sum_recursive(&values), expected);
        }
    }
}
