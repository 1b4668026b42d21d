//! Tests for the inner product variants.

use super::*;
use crate::error::KernelError;

fn square_case() -> TestCase<f64> {
    InnerProductGenerator::new(ELIMINATED_ROWS, ELIMINATED_COLS, Fill::Sequential).generate(0)
}

#[test]
fn test_sequential_generator() {
    let case = InnerProductGenerator::<i32>::new(2, 3, Fill::Sequential).generate(99);
    assert_eq!(case.vec, vec![0, 1, 2]);
    assert_eq!(case.mat.row(0), &[0, 1, 2]);
    assert_eq!(case.mat.row(1), &[1, 2, 3]);
}

#[test]
fn test_random_generator_reproducible() {
    let gen = InnerProductGenerator::<i64>::new(8, 5, Fill::Random);
    assert_eq!(gen.generate(3), gen.generate(3));
    assert_ne!(gen.generate(3), gen.generate(4));
}

#[test]
fn test_compiled_shape_closed_form() {
    // res[i] = Σ_j (i + j) * j = 4950 i + 328350 for 100 columns
    let case = square_case();
    for variant in code::available_variants::<f64>() {
        let res = (variant.function)(&case).unwrap();
        assert_eq!(res.len(), 100, "{}", variant.name);
        for (i, &r) in res.iter().enumerate() {
            assert_eq!(r, 4950.0 * i as f64 + 328_350.0, "{} row {}", variant.name, i);
        }
    }
}

#[test]
fn test_small_known_product() {
    let case = TestCase {
        mat: Matrix::from_rows(vec![vec![1, 2, 3, 4, 5], vec![6, 7, 8, 9, 10]]).unwrap(),
        vec: vec![1, 0, 2, 0, 1],
    };
    let expected = vec![1 + 6 + 5, 6 + 16 + 10];
    assert_eq!(inner_product_trivial(&case).unwrap(), expected);
    assert_eq!(inner_product_cache_friendly(&case).unwrap(), expected);
    assert_eq!(inner_product_unrolled_loop(&case).unwrap(), expected);
}

#[test]
fn test_dimension_mismatch_rejected_by_every_variant() {
    let case = TestCase {
        mat: Matrix::<f64>::zeros(ELIMINATED_ROWS, ELIMINATED_COLS),
        vec: vec![0.0; ELIMINATED_COLS - 1],
    };
    for variant in code::available_variants::<f64>() {
        assert_eq!(
            (variant.function)(&case),
            Err(KernelError::DimensionMismatch {
                cols: ELIMINATED_COLS,
                len: ELIMINATED_COLS - 1
            }),
            "{}",
            variant.name
        );
    }
}

#[test]
fn test_eliminated_loop_rejects_other_shapes() {
    let case = InnerProductGenerator::<f64>::new(4, 4, Fill::Sequential).generate(0);
    let err = inner_product_eliminated_loop::<f64, 100, 100>(&case).unwrap_err();
    assert_eq!(
        err,
        KernelError::ShapeMismatch {
            rows: 100,
            cols: 100,
            found_rows: 4,
            found_cols: 4
        }
    );
    let res = inner_product_eliminated_loop::<f64, 4, 4>(&case).unwrap();
    assert_eq!(res, inner_product_trivial(&case).unwrap());
}

#[test]
fn test_empty_matrix() {
    let case = InnerProductGenerator::<f64>::new(0, 0, Fill::Sequential).generate(0);
    assert_eq!(inner_product_trivial(&case).unwrap(), Vec::<f64>::new());
    assert_eq!(inner_product_unrolled_loop(&case).unwrap(), Vec::<f64>::new());
}

#[test]
fn test_supports_shape() {
    assert!(code::supports_shape("trivial", 3, 7));
    assert!(!code::supports_shape("eliminated_loop", 3, 7));
    assert!(code::supports_shape("eliminated_loop", 100, 100));
}

#[test]
fn test_eliminated_loop_skipped_off_shape() {
    let config = RunConfig {
        rows: 10,
        cols: 10,
        repeat: 1,
        output_root: None,
        ..RunConfig::default()
    };
    let jobs = InnerProductRunner.variant_jobs(&config).unwrap();
    let names: Vec<_> = jobs.iter().map(|j| j.name).collect();
    assert_eq!(names, vec!["trivial", "cache_friendly", "unrolled_loop"]);
}

#[test]
fn test_i32_overflow_wraps_in_every_variant() {
    // Nine columns cover two unrolled chunks plus a remainder.
    let case = TestCase {
        mat: Matrix::from_fn(2, 9, |i, _| if i == 0 { i32::MAX } else { i32::MIN }),
        vec: vec![7; 9],
    };
    let expected = vec![
        (i32::MAX as i64 * 63) as i32,
        (i32::MIN as i64 * 63) as i32,
    ];
    assert_eq!(inner_product_trivial(&case).unwrap(), expected);
    assert_eq!(inner_product_cache_friendly(&case).unwrap(), expected);
    assert_eq!(inner_product_unrolled_loop(&case).unwrap(), expected);
    assert_eq!(inner_product_eliminated_loop::<i32, 2, 9>(&case).unwrap(), expected);
}

#[test]
fn test_i32_jobs_on_large_matrix() {
    // Row sums of (i + j) * j reach ~3.3e11 for 1000 columns.
    let config = RunConfig {
        rows: 1000,
        cols: 1000,
        repeat: 1,
        element: ElementType::I32,
        output_root: None,
        ..RunConfig::default()
    };
    let jobs = InnerProductRunner.variant_jobs(&config).unwrap();
    assert_eq!(jobs.len(), 3);
    let reference = jobs[0].result_sample;
    for job in &jobs {
        assert_eq!(job.result_sample, reference, "{}", job.name);
    }
}

#[test]
fn test_registry_verify() {
    InnerProductRunner.verify().unwrap();
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn integer_variants_agree(rows in 0usize..12, cols in 0usize..23, seed in any::<u64>()) {
            let case = InnerProductGenerator::<i64>::new(rows, cols, Fill::Random).generate(seed);
            let expected = inner_product_trivial(&case).unwrap();
            prop_assert_eq!(inner_product_cache_friendly(&case).unwrap(), expected.clone());
            prop_assert_eq!(inner_product_unrolled_loop(&case).unwrap(), expected);
        }
    }
}
