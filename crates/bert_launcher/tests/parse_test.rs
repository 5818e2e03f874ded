use anyhow::Result;
use bert_launcher::options::{
    DdpBackend, Subset, DATASET_HEADING, DISTRIBUTED_HEADING, OPTIMIZATION_HEADING,
};
use bert_launcher::{ConfigErrorKind, LaunchError, ParsedConfig, TrainingParser};

const REQUIRED: [&str; 5] = ["bert_launcher", "bert", "data/wiki", "--config-file", "bert.json"];

fn parse(extra: &[&str]) -> Result<ParsedConfig, LaunchError> {
    let mut args = REQUIRED.to_vec();
    args.extend_from_slice(extra);
    TrainingParser::new(0).parse_from(args)
}

#[test]
fn test_defaults() -> Result<()> {
    let config = parse(&[])?;

    assert!(!config.no_progress_bar);
    assert_eq!(config.seed, 19940802);
    assert_eq!(config.log_interval, 1000);

    let dataset = &config.dataset;
    assert_eq!(dataset.task, "bert");
    assert_eq!(dataset.data.to_str(), Some("data/wiki"));
    assert_eq!(dataset.num_workers, 16);
    assert_eq!(dataset.max_tokens, None);
    assert_eq!(dataset.max_sentences, None);
    assert_eq!(dataset.train_subset, Subset::Train);
    assert_eq!(dataset.valid_subset, "valid");
    assert_eq!(dataset.validate_interval, 1);
    assert!(!dataset.disable_validation);
    assert_eq!(dataset.dict, None);

    let distributed = &config.distributed;
    assert_eq!(distributed.world_size, 1);
    assert_eq!(distributed.rank, 0);
    assert_eq!(distributed.gpus_per_node, 2);
    assert_eq!(distributed.backend, "nccl");
    assert_eq!(distributed.init_method, None);
    assert_eq!(distributed.device_id, 0);
    assert!(!distributed.no_spawn);
    assert_eq!(distributed.ddp_backend, DdpBackend::C10d);
    assert_eq!(distributed.bucket_cap_mb, 25);
    assert!(!distributed.find_unused_parameters);
    assert!(!distributed.is_distributed());

    let optimization = &config.optimization;
    assert_eq!(optimization.max_epoch, 0);
    assert_eq!(optimization.max_update, 0);
    assert_eq!(optimization.epoch_limit(), None);
    assert_eq!(optimization.update_limit(), None);
    assert_eq!(optimization.clip_norm, 25.0);
    assert_eq!(optimization.update_freq.as_slice(), &[1]);
    assert_eq!(optimization.lr.as_slice(), &[0.25]);
    assert_eq!(optimization.min_lr, -1.0);
    assert!(!optimization.use_bmuf);
    Ok(())
}

#[test]
fn test_valid_limits_follow_train_limits() -> Result<()> {
    let config = parse(&["--max-sentences", "64", "--max-tokens", "8192"])?;
    assert_eq!(config.dataset.max_sentences_valid, Some(64));
    assert_eq!(config.dataset.max_tokens_valid, Some(8192));

    // Both absent stays absent
    let config = parse(&[])?;
    assert_eq!(config.dataset.max_sentences_valid, None);
    assert_eq!(config.dataset.max_tokens_valid, None);

    let config = parse(&["--max-sentences", "64", "--max-sentences-valid", "4"])?;
    assert_eq!(config.dataset.max_sentences_valid, Some(4));
    Ok(())
}

#[test]
fn test_list_values() -> Result<()> {
    let config = parse(&["--lr", "0.1,0.05,0.01", "--update-freq", "2,4"])?;
    assert_eq!(config.optimization.lr.as_slice(), &[0.1, 0.05, 0.01]);
    assert_eq!(config.optimization.update_freq.as_slice(), &[2, 4]);

    let config = parse(&["--lr", "0.25"])?;
    assert_eq!(config.optimization.lr.as_slice(), &[0.25]);

    let config = parse(&["--lr", "[0.1, 0.05]", "--update-freq", "(8,)"])?;
    assert_eq!(config.optimization.lr.as_slice(), &[0.1, 0.05]);
    assert_eq!(config.optimization.update_freq.as_slice(), &[8]);
    Ok(())
}

#[test]
fn test_bad_list_is_config_error() {
    let err = parse(&["--update-freq", "2,x"]).unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::InvalidValue));

    let err = parse(&["--lr", ""]).unwrap_err();
    assert!(err.config_kind().is_some());

    let err = parse(&["--num-workers", "many"]).unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::InvalidValue));
}

#[test]
fn test_negative_min_lr() -> Result<()> {
    let config = parse(&["--min-lr", "-0.5"])?;
    assert_eq!(config.optimization.min_lr, -0.5);

    let config = parse(&["--min-lr=1e-5"])?;
    assert_eq!(config.optimization.min_lr, 1e-5);
    Ok(())
}

#[test]
fn test_negative_values_reach_value_parsers() -> Result<()> {
    let config = parse(&["--clip-norm", "-1", "--lr", "-0.1"])?;
    assert_eq!(config.optimization.clip_norm, -1.0);
    assert_eq!(config.optimization.lr.as_slice(), &[-0.1]);

    let config = parse(&["--lr=-0.1,0.05"])?;
    assert_eq!(config.optimization.lr.as_slice(), &[-0.1, 0.05]);

    let err = parse(&["--max-epoch", "-1"]).unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::InvalidValue));

    let err = parse(&["--update-freq", "-2"]).unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::InvalidValue));
    Ok(())
}

#[test]
fn test_flag_without_value() {
    let err = parse(&["--max-tokens"]).unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::InvalidChoice));
}

#[test]
fn test_missing_required() {
    let parser = TrainingParser::new(0);

    let err = parser
        .parse_from(["bert_launcher", "data/wiki"])
        .unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::MissingRequired));

    let err = parser
        .parse_from(["bert_launcher", "--config-file", "bert.json"])
        .unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::MissingRequired));
}

#[test]
fn test_task_may_be_omitted() -> Result<()> {
    let config = TrainingParser::new(0).parse_from([
        "bert_launcher",
        "data/wiki",
        "--config-file",
        "bert.json",
    ])?;
    assert_eq!(config.dataset.task, "bert");
    assert_eq!(config.dataset.data.to_str(), Some("data/wiki"));
    Ok(())
}

#[test]
fn test_choices_are_enforced() -> Result<()> {
    let err = parse(&["--ddp-backend", "no_c10d"]).unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::InvalidChoice));

    let err = parse(&["--train-subset", "dev"]).unwrap_err();
    assert_eq!(err.config_kind(), Some(ConfigErrorKind::InvalidChoice));

    let config = parse(&["--train-subset", "valid", "--ddp-backend", "c10d"])?;
    assert_eq!(config.dataset.train_subset, Subset::Valid);
    Ok(())
}

#[test]
fn test_unknown_and_abbreviated_flags_are_usage_errors() {
    assert!(parse(&["--fp16"]).unwrap_err().is_usage());
    assert!(parse(&["--max-tok", "10"]).unwrap_err().is_usage());
    assert!(parse(&["extra-positional"]).unwrap_err().is_usage());
}

#[test]
fn test_aliases() -> Result<()> {
    let config = TrainingParser::new(0).parse_from([
        "bert_launcher",
        "bert",
        "data/wiki",
        "--config_file",
        "bert.json",
        "--batch-size",
        "12",
        "--distributed-world-size",
        "4",
        "--distributed-rank",
        "2",
        "--distributed-gpus",
        "3",
        "--distributed-backend",
        "gloo",
        "--distributed-init-method",
        "tcp://node1:2333",
        "--local_rank",
        "1",
        "--distributed-no-spawn",
        "--me",
        "10",
        "--mu",
        "5000",
        "--learning-rate",
        "0.5",
    ])?;

    assert_eq!(config.dataset.config_file.to_str(), Some("bert.json"));
    assert_eq!(config.dataset.max_sentences, Some(12));
    assert_eq!(config.dataset.max_sentences_valid, Some(12));
    assert_eq!(config.distributed.world_size, 4);
    assert_eq!(config.distributed.rank, 2);
    assert_eq!(config.distributed.gpus_per_node, 3);
    assert_eq!(config.distributed.backend, "gloo");
    assert_eq!(
        config.distributed.init_method.as_deref(),
        Some("tcp://node1:2333")
    );
    assert_eq!(config.distributed.device_id, 1);
    assert!(config.distributed.no_spawn);
    assert!(config.distributed.is_distributed());
    assert_eq!(config.optimization.epoch_limit(), Some(10));
    assert_eq!(config.optimization.update_limit(), Some(5000));
    assert_eq!(config.optimization.lr.as_slice(), &[0.5]);

    let config = parse(&["--local-rank", "3"])?;
    assert_eq!(config.distributed.device_id, 3);
    Ok(())
}

#[test]
fn test_valid_subsets_split() -> Result<()> {
    let config = parse(&["--valid-subset", "valid, valid1,,test"])?;
    assert_eq!(config.dataset.valid_subsets(), vec!["valid", "valid1", "test"]);
    Ok(())
}

#[test]
fn test_help_headings() {
    let cmd = TrainingParser::new(0).command();
    let heading = |id: &str| {
        cmd.get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_help_heading())
            .map(str::to_string)
    };

    for id in ["num_workers", "max_sentences", "max_tokens_valid", "config_file", "dict"] {
        assert_eq!(heading(id).as_deref(), Some(DATASET_HEADING), "{id}");
    }
    for id in ["world_size", "device_id", "ddp_backend", "bucket_cap_mb"] {
        assert_eq!(heading(id).as_deref(), Some(DISTRIBUTED_HEADING), "{id}");
    }
    for id in ["max_epoch", "update_freq", "lr", "min_lr", "use_bmuf"] {
        assert_eq!(heading(id).as_deref(), Some(OPTIMIZATION_HEADING), "{id}");
    }
    assert_eq!(heading("seed"), None);
}

#[test]
fn test_world_size_default_in_help() {
    let cmd = TrainingParser::new(6).command();
    let world_size = cmd
        .get_arguments()
        .find(|arg| arg.get_id() == "world_size")
        .map(|arg| {
            arg.get_default_values()
                .iter()
                .map(|v| v.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        });
    assert_eq!(world_size, Some(vec!["6".to_string()]));
}

#[test]
fn test_task_listed_before_data_in_help() {
    let help = TrainingParser::new(0).command().render_help().to_string();
    let section = help
        .find(DATASET_HEADING)
        .map(|start| &help[start..])
        .unwrap_or_default();
    let task = section.find("[TASK]");
    let data = section.find("<DATA>");
    assert!(task.is_some() && data.is_some(), "{help}");
    assert!(task < data, "{help}");
}
