//! # CLI Workflow Tests
//!
//! Runs the subcommand handlers the way an operator and an auditor would:
//! the operator proves from files on disk, the auditor verifies the written
//! document and an inclusion path using only published values.

use std::path::Path;

use zkr_cli::prove::{run_prove, ProveArgs};
use zkr_cli::status::{run_status, StatusArgs};
use zkr_cli::tree::{build_tree, inclusion_proof, run_path, PathArgs};
use zkr_cli::verify::{check_inclusion, run_verify, VerifyArgs, VerifyCommand};
use zkr_cli::{ZkrConfig, EXIT_FAILURE, EXIT_INSOLVENT, EXIT_OK};
use zkr_core::PublishedProof;
use zkr_ledger::AmountPolicy;

const LEDGER: &str = "# exported from core ledger\naccount_id,amount\nalice,20000\nbob,30000\ncarol,15000\ndave,12000\neve,8000\n";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn prove_args(dir: &Path, reserves: Vec<u64>) -> ProveArgs {
    ProveArgs {
        csv: write(dir, "liabilities.csv", LEDGER),
        entity_id: "0x6b72616b656e".into(),
        block_height: 880_412,
        reserves,
        timestamp: Some(1_768_478_400),
        out: Some(dir.join("proof.json")),
        lenient_amounts: false,
    }
}

#[test]
fn operator_proves_and_auditor_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let config = ZkrConfig::default();

    assert_eq!(run_prove(&prove_args(dir.path(), vec![100_000]), &config).unwrap(), EXIT_OK);

    let verify = VerifyArgs {
        command: VerifyCommand::Commitment {
            file: dir.path().join("proof.json"),
            commitment: None,
        },
    };
    assert_eq!(run_verify(&verify, &config).unwrap(), EXIT_OK);
}

#[test]
fn tampered_document_fails_verification() {
    let dir = tempfile::tempdir().unwrap();
    let config = ZkrConfig::default();
    run_prove(&prove_args(dir.path(), vec![100_000]), &config).unwrap();

    let path = dir.path().join("proof.json");
    let mut doc: PublishedProof =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    doc.public_inputs.proof_timestamp += 1;
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let verify = VerifyArgs {
        command: VerifyCommand::Commitment {
            file: path,
            commitment: None,
        },
    };
    assert_eq!(run_verify(&verify, &config).unwrap(), EXIT_FAILURE);
}

#[test]
fn insolvent_operator_gets_distinct_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let code = run_prove(&prove_args(dir.path(), vec![50_000, 34_999]), &ZkrConfig::default())
        .unwrap();
    assert_eq!(code, EXIT_INSOLVENT);
}

#[test]
fn customer_checks_inclusion_from_path_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ZkrConfig::default();
    let csv = write(dir.path(), "liabilities.csv", LEDGER);

    let hasher = config.hasher().unwrap();
    let (parsed, tree) = build_tree(hasher.as_ref(), LEDGER, AmountPolicy::Strict).unwrap();
    let proof = inclusion_proof(&parsed, &tree, Some("dave"), None).unwrap();
    let path_file = write(
        dir.path(),
        "dave.json",
        &serde_json::to_string_pretty(&proof).unwrap(),
    );
    let root = tree.root().to_hex();

    assert_eq!(
        run_path(
            &PathArgs {
                csv,
                account: Some("dave".into()),
                index: None,
                lenient_amounts: false,
            },
            &config
        )
        .unwrap(),
        EXIT_OK
    );

    let ok = VerifyArgs {
        command: VerifyCommand::Inclusion {
            account: "dave".into(),
            amount: 12_000,
            path_file: Some(path_file.clone()),
            path: None,
            root: root.clone(),
        },
    };
    assert_eq!(run_verify(&ok, &config).unwrap(), EXIT_OK);

    let wrong = VerifyArgs {
        command: VerifyCommand::Inclusion {
            account: "dave".into(),
            amount: 12_001,
            path_file: Some(path_file),
            path: None,
            root,
        },
    };
    assert_eq!(run_verify(&wrong, &config).unwrap(), EXIT_FAILURE);
}

#[test]
fn custom_modulus_config_is_used_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write(
        dir.path(),
        "zkr.yaml",
        "hash:\n  modulus: \"0x7fffffffffffffffffffffffffffffff\"\n",
    );
    let config = ZkrConfig::load(Some(config_path.as_path())).unwrap();
    let hasher = config.hasher().unwrap();
    let (parsed, tree) = build_tree(hasher.as_ref(), LEDGER, AmountPolicy::Strict).unwrap();
    let proof = inclusion_proof(&parsed, &tree, None, Some(0)).unwrap();
    let path = serde_json::to_string(&proof.path).unwrap();
    assert!(check_inclusion(hasher.as_ref(), "alice", 20_000, &path, &tree.root().to_hex()).unwrap());

    // The default-domain hasher disagrees on every root.
    let default_hasher = ZkrConfig::default().hasher().unwrap();
    assert!(!check_inclusion(default_hasher.as_ref(), "alice", 20_000, &path, &tree.root().to_hex())
        .unwrap());
}

#[test]
fn status_reads_snapshot_from_config() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "registry.json",
        r#"{"entities":[
            {"entity_id":"0x6b72616b656e","name":"Kraken",
             "proof_record":["0x6b72616b656e","0xd6d80","0xabc","0x2",
                             "0x6968c6c0","0x1","0x698f53c0","0x1"]},
            {"entity_id":"0x6e6577","name":"Newcomer"}
        ]}"#,
    );
    let config_path = write(
        dir.path(),
        "zkr.yaml",
        "registry:\n  snapshot: registry.json\nlifecycle:\n  expiry_warning_secs: 172800\n",
    );
    let config = ZkrConfig::load(Some(config_path.as_path())).unwrap();

    let all = StatusArgs {
        entity_id: None,
        snapshot: None,
        now: Some(1_768_478_400),
        json: true,
    };
    assert_eq!(run_status(&all, &config).unwrap(), EXIT_OK);

    let missing = StatusArgs {
        entity_id: Some("0x1".into()),
        snapshot: None,
        now: Some(1_768_478_400),
        json: false,
    };
    assert_eq!(run_status(&missing, &config).unwrap(), EXIT_FAILURE);
}
