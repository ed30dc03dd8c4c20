use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn tagsel() -> Command {
    let mut cmd = cargo_bin_cmd!("tagsel");
    cmd.env_remove("TAGSEL_CONFIG")
        .env_remove("TAGSEL_LOG")
        .env_remove("TAGSEL_LOG_LEVEL");
    cmd
}

/// A small suite spread over two modules
///
/// - `account.TestInvoice` is post-install only (base drops `standard`,
///   the class adds it back)
/// - `sale.TestSale` keeps the defaults
/// - `sale.TestManual` sets its tags explicitly
pub const SAMPLE_MANIFEST: &str = r#"{
    "classes": [
        {"name": "Base", "module": "account", "decorators": [["-standard"]]},
        {"name": "TestInvoice", "module": "account", "bases": ["Base"],
         "decorators": [["post_install", "-at_install"], ["standard"]]},
        {"name": "TestSale", "module": "sale"},
        {"name": "TestManual", "module": "sale", "explicit_tags": ["manual"]}
    ],
    "tests": [
        {"class": "TestInvoice", "method": "test_post",
         "source_path": "addons/account/tests/test_invoice.py"},
        {"class": "TestSale", "method": "test_order",
         "source_path": "addons/sale/tests/test_sale.py", "tags": ["slow"]},
        {"class": "TestManual", "method": "test_manual",
         "source_path": "addons/sale/tests/test_manual.py"},
        {"class": "sale.TestSale", "method": "test_cross",
         "source_path": "addons/sale/tests/test_sale.py", "cross_module": true}
    ]
}"#;

#[allow(dead_code)]
pub fn write_manifest(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("manifest.json");
    fs::write(&path, content).unwrap();
    path
}

#[allow(dead_code)]
pub fn write_sample_manifest(dir: &Path) -> PathBuf {
    write_manifest(dir, SAMPLE_MANIFEST)
}
