//! Argument vectors the benchmark executables receive
//!
//! Each case pins the exact positional order and trailing flags, since the
//! executables parse their arguments by position.

use shard_sweep::config::{ConfigPoint, Dimension, Implementation, MAX_SHARD_COUNT};
use shard_sweep::invoke::{Executable, ProcessInvoker};
use shard_sweep::Error;

fn sharded(implementation: Implementation, shards: u64) -> ConfigPoint {
    ConfigPoint::builder(implementation)
        .send_count(1 << 20)
        .fetch_count(8192)
        .thread_count(48)
        .user_count(8192)
        .shard_count(shards)
        .run_count(10)
        .build()
}

#[test]
fn test_argument_table() {
    let baseline = ConfigPoint::builder(Implementation::Baseline)
        .send_count(262_144)
        .fetch_count(8192)
        .thread_count(48)
        .run_count(10)
        .warmup_count(2)
        .build();

    let cases: Vec<(ConfigPoint, Vec<&str>)> = vec![
        (
            baseline,
            vec!["262144", "8192", "48", "-r", "10", "-w", "2"],
        ),
        (
            sharded(Implementation::Sharded, 5),
            vec!["1048576", "8192", "48", "8192", "5", "-r", "10", "-w", "0"],
        ),
        (
            sharded(Implementation::DistributedSharded, 15),
            vec!["1048576", "8192", "48", "8192", "15", "-r", "10", "-w", "0"],
        ),
    ];

    for (point, expected) in cases {
        point.validate().unwrap();
        let args = point.implementation().contract().build_args(&point).unwrap();
        assert_eq!(args, expected, "arguments for {point}");
    }
}

#[test]
fn test_cargo_wrapper_precedes_contract_arguments() {
    let point = sharded(Implementation::Sharded, 5);
    let exe = Executable::cargo_release("sparta");
    let args = ProcessInvoker::arguments(&point, &exe).unwrap();
    assert_eq!(&args[..3], ["run", "--release", "--"]);
    assert_eq!(args.len(), 3 + 9);
    assert_eq!(exe.working_dir(), std::path::Path::new("sparta"));
}

#[test]
fn test_default_directories() {
    assert_eq!(Implementation::Baseline.default_dir(), "baseline");
    assert_eq!(Implementation::Sharded.default_dir(), "sparta");
    assert_eq!(Implementation::DistributedSharded.default_dir(), "sparta-d");
}

#[test]
fn test_sharded_point_without_users_is_rejected() {
    let point = ConfigPoint::builder(Implementation::Sharded)
        .send_count(16)
        .fetch_count(16)
        .thread_count(4)
        .shard_count(2)
        .build();
    assert!(matches!(point.validate(), Err(Error::InvalidConfig(_))));
    assert!(Implementation::Sharded.contract().build_args(&point).is_err());
}

#[test]
fn test_zero_positional_is_rejected() {
    let point = sharded(Implementation::Sharded, 5).with_dimension(Dimension::Fetch, 0);
    let err = point.validate().unwrap_err();
    assert!(err.to_string().contains("fetch"));
}

#[test]
fn test_shard_limit() {
    assert!(sharded(Implementation::Sharded, MAX_SHARD_COUNT).validate().is_ok());
    let err = sharded(Implementation::Sharded, MAX_SHARD_COUNT + 1)
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("exceeds the limit"));
}

#[test]
fn test_baseline_ignores_shard_fields() {
    let point = ConfigPoint::builder(Implementation::Baseline)
        .send_count(4)
        .fetch_count(2)
        .thread_count(1)
        .shard_count(9)
        .build();
    let args = Implementation::Baseline.contract().build_args(&point).unwrap();
    assert!(!args.contains(&"9".to_string()));
}
