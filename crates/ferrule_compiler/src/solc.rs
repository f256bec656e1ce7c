//! A [`SolidityCompiler`] that drives a native `solc --standard-json`.
//!
//! The binary cannot call back into the engine for imports, so the import
//! graph is expanded up front: every `import` directive is resolved against
//! the importing unit and looked up through the [`ImportResolver`]. Imports
//! the resolver does not know are left out for solc to report.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::backend::{
    CompiledContract, CompilerInput, CompilerOutput, ImportResolver, SolidityCompiler,
};
use crate::error::InvocationError;

/// Optimizer runs passed to solc when the optimizer is enabled.
const OPTIMIZER_RUNS: u32 = 200;

static IMPORT_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:[^;"']*?\bfrom\s+)?["']([^"']+)["']"#).expect("valid regex")
});

/// Runs a solc binary in standard-JSON mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolcStandardJson;

impl SolcStandardJson {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SolidityCompiler for SolcStandardJson {
    async fn compile(
        &self,
        binary: &Path,
        input: &CompilerInput,
        imports: &dyn ImportResolver,
    ) -> Result<CompilerOutput, InvocationError> {
        let sources = expand_imports(&input.sources, imports);
        let request = standard_input(&sources, input.optimizer_enabled).to_string();

        let spawn_err = |source: std::io::Error| InvocationError::Spawn {
            binary: binary.to_path_buf(),
            source,
        };
        let mut child = Command::new(binary)
            .arg("--standard-json")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_err)?;
        // A binary that rejects the request can exit before reading stdin.
        // Its exit status and stderr are reported below instead.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(request.as_bytes()).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!("{} closed stdin early", binary.display());
                }
                Err(e) => return Err(spawn_err(e)),
            }
        }
        let output = child.wait_with_output().await.map_err(spawn_err)?;

        if !output.status.success() {
            return Err(InvocationError::Exited {
                binary: binary.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_output(&output.stdout)
    }
}

/// Builds the standard-JSON request body.
fn standard_input(
    sources: &BTreeMap<String, String>,
    optimizer_enabled: bool,
) -> serde_json::Value {
    let sources: serde_json::Map<String, serde_json::Value> = sources
        .iter()
        .map(|(name, content)| (name.clone(), json!({ "content": content })))
        .collect();
    json!({
        "language": "Solidity",
        "sources": sources,
        "settings": {
            "optimizer": { "enabled": optimizer_enabled, "runs": OPTIMIZER_RUNS },
            "outputSelection": { "*": { "*": ["abi", "evm.bytecode.object"] } }
        }
    })
}

#[derive(Deserialize)]
struct StandardOutput {
    #[serde(default)]
    contracts: BTreeMap<String, BTreeMap<String, StandardContract>>,
    #[serde(default)]
    errors: Vec<StandardError>,
}

#[derive(Deserialize)]
struct StandardContract {
    #[serde(default)]
    abi: serde_json::Value,
    #[serde(default)]
    evm: StandardEvm,
}

#[derive(Deserialize, Default)]
struct StandardEvm {
    #[serde(default)]
    bytecode: StandardBytecode,
}

#[derive(Deserialize, Default)]
struct StandardBytecode {
    #[serde(default)]
    object: String,
}

#[derive(Deserialize)]
struct StandardError {
    #[serde(rename = "formattedMessage")]
    formatted_message: Option<String>,
    message: String,
}

/// Converts solc's standard-JSON output into a [`CompilerOutput`].
fn parse_output(stdout: &[u8]) -> Result<CompilerOutput, InvocationError> {
    let raw: StandardOutput =
        serde_json::from_slice(stdout).map_err(|e| InvocationError::MalformedOutput {
            reason: e.to_string(),
        })?;

    let mut contracts = BTreeMap::new();
    for (file, entries) in raw.contracts {
        for (name, contract) in entries {
            contracts.insert(
                format!("{file}:{name}"),
                CompiledContract {
                    interface: contract.abi.to_string(),
                    bytecode: contract.evm.bytecode.object,
                },
            );
        }
    }
    let errors = raw
        .errors
        .into_iter()
        .map(|e| e.formatted_message.unwrap_or(e.message))
        .collect();
    Ok(CompilerOutput { contracts, errors })
}

/// Adds every transitively imported source the resolver knows to `sources`.
fn expand_imports(
    sources: &BTreeMap<String, String>,
    imports: &dyn ImportResolver,
) -> BTreeMap<String, String> {
    let mut units = sources.clone();
    let mut pending: Vec<String> = units.keys().cloned().collect();

    while let Some(unit) = pending.pop() {
        let Some(content) = units.get(&unit).cloned() else {
            continue;
        };
        for import in import_paths(&content) {
            let name = resolve_unit_name(&unit, import);
            if units.contains_key(&name) {
                continue;
            }
            match imports.find_import(&name).contents {
                Some(contents) => {
                    units.insert(name.clone(), contents);
                    pending.push(name);
                }
                None => tracing::debug!("import {import} from {unit} not found"),
            }
        }
    }
    units
}

/// Returns the paths named by `import` directives, in source order.
fn import_paths(source: &str) -> Vec<&str> {
    IMPORT_DIRECTIVE
        .captures_iter(source)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Resolves an import path to the unit name solc will ask for.
///
/// `./` and `../` imports are relative to the importing unit's directory;
/// anything else is used as written.
fn resolve_unit_name(importer: &str, import: &str) -> String {
    if !(import.starts_with("./") || import.starts_with("../")) {
        return normalize_unit(import);
    }
    let joined = match importer.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{import}"),
        None => import.to_string(),
    };
    normalize_unit(&joined)
}

fn normalize_unit(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrule_source::SourceSet;

    #[test]
    fn finds_all_import_forms() {
        let src = r#"pragma solidity ^0.4.11;
import "./Ownable.sol";
import {SafeMath} from "../lib/SafeMath.sol";
import * as Tokens from 'tokens/ERC20.sol';
import "Base.sol" as B;
// import "Commented.sol";
contract Foo {}
"#;
        assert_eq!(
            import_paths(src),
            vec!["./Ownable.sol", "../lib/SafeMath.sol", "tokens/ERC20.sol", "Base.sol"]
        );
    }

    #[test]
    fn resolves_relative_units() {
        assert_eq!(resolve_unit_name("Foo.sol", "./Bar.sol"), "Bar.sol");
        assert_eq!(resolve_unit_name("a/b/Foo.sol", "../Bar.sol"), "a/Bar.sol");
        assert_eq!(resolve_unit_name("a/Foo.sol", "./c/Bar.sol"), "a/c/Bar.sol");
        assert_eq!(resolve_unit_name("a/Foo.sol", "lib/Bar.sol"), "lib/Bar.sol");
    }

    #[test]
    fn expands_transitive_imports() {
        let mut set = SourceSet::new();
        set.add_source("Ownable.sol", "contract Ownable {}");
        set.add_source("Token.sol", "import \"./Ownable.sol\";\ncontract Token is Ownable {}");

        let input = CompilerInput::single("Exchange.sol", "import \"./lib/Token.sol\";", false);
        let units = expand_imports(&input.sources, &set);

        assert_eq!(units.len(), 3);
        assert!(units.contains_key("Exchange.sol"));
        assert_eq!(units["lib/Token.sol"], set.get("Token.sol").unwrap().content);
        assert_eq!(units["lib/Ownable.sol"], "contract Ownable {}");
    }

    #[test]
    fn unknown_imports_are_left_out() {
        let set = SourceSet::new();
        let input = CompilerInput::single("Foo.sol", "import \"./Missing.sol\";", false);
        let units = expand_imports(&input.sources, &set);
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn import_cycles_terminate() {
        let mut set = SourceSet::new();
        set.add_source("A.sol", "import \"./B.sol\";");
        set.add_source("B.sol", "import \"./A.sol\";");
        let input = CompilerInput::single("A.sol", "import \"./B.sol\";", false);
        let units = expand_imports(&input.sources, &set);
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn request_carries_sources_and_optimizer() {
        let input = CompilerInput::single("Foo.sol", "contract Foo {}", true);
        let request = standard_input(&input.sources, input.optimizer_enabled);
        assert_eq!(request["language"], "Solidity");
        assert_eq!(request["sources"]["Foo.sol"]["content"], "contract Foo {}");
        assert_eq!(request["settings"]["optimizer"]["enabled"], true);
    }

    #[test]
    fn parses_standard_output() {
        let stdout = br#"{
            "contracts": {
                "Foo.sol": {
                    "Foo": {
                        "abi": [{"type": "constructor", "inputs": [], "payable": false}],
                        "evm": { "bytecode": { "object": "6060604052" } }
                    }
                }
            },
            "errors": [
                { "severity": "warning", "message": "short", "formattedMessage": "Foo.sol:1:1: Warning: long" },
                { "severity": "error", "message": "only message" }
            ]
        }"#;
        let output = parse_output(stdout).unwrap();
        let foo = &output.contracts["Foo.sol:Foo"];
        assert_eq!(foo.bytecode, "6060604052");
        assert!(foo.interface.starts_with("[{"));
        assert_eq!(
            output.errors,
            vec!["Foo.sol:1:1: Warning: long".to_string(), "only message".to_string()]
        );
    }

    #[test]
    fn rejects_non_json_output() {
        let err = parse_output(b"solc: unknown option").unwrap_err();
        assert!(matches!(err, InvocationError::MalformedOutput { .. }));
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("no-such-solc");
        let input = CompilerInput::single("Foo.sol", "contract Foo {}", false);
        let err = SolcStandardJson::new()
            .compile(&binary, &input, &SourceSet::new())
            .await
            .unwrap_err();
        assert!(matches!(err, InvocationError::Spawn { .. }));
    }

    #[cfg(unix)]
    fn stub_solc(dir: &Path, script: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("solc-stub");
        std::fs::write(&path, format!("#!/bin/sh\n{script}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stub_binary_receives_request_on_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let request_copy = dir.path().join("request.json");
        let binary = stub_solc(
            dir.path(),
            &format!(
                "[ \"$1\" = \"--standard-json\" ] || exit 2\n\
                 cat > '{}'\n\
                 printf '%s' '{{\"contracts\":{{\"Foo.sol\":{{\"Foo\":{{\"abi\":[],\"evm\":{{\"bytecode\":{{\"object\":\"6060\"}}}}}}}}}},\"errors\":[{{\"message\":\"Warning: w\"}}]}}'\n",
                request_copy.display()
            ),
        );
        let mut set = SourceSet::new();
        set.add_source("Ownable.sol", "contract Ownable {}");
        let input = CompilerInput::single(
            "Foo.sol",
            "import \"./Ownable.sol\";\ncontract Foo is Ownable {}",
            true,
        );

        let output = SolcStandardJson::new()
            .compile(&binary, &input, &set)
            .await
            .unwrap();
        let names: Vec<&str> = output.contracts.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Foo.sol:Foo"]);
        assert_eq!(output.contracts["Foo.sol:Foo"].bytecode, "6060");
        assert_eq!(output.errors, vec!["Warning: w".to_string()]);

        let request: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&request_copy).unwrap()).unwrap();
        assert_eq!(request["settings"]["optimizer"]["enabled"], true);
        assert_eq!(request["sources"]["Ownable.sol"]["content"], "contract Ownable {}");
        assert!(request["sources"]["Foo.sol"]["content"]
            .as_str()
            .unwrap()
            .contains("contract Foo"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_binary_reports_exit_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let binary = stub_solc(
            dir.path(),
            "echo 'unrecognised option --standard-json' >&2\nexit 1\n",
        );
        let input = CompilerInput::single("Foo.sol", &"contract Foo {}\n".repeat(10_000), false);

        for _ in 0..5 {
            let err = SolcStandardJson::new()
                .compile(&binary, &input, &SourceSet::new())
                .await
                .unwrap_err();
            match err {
                InvocationError::Exited { stderr, .. } => {
                    assert_eq!(stderr, "unrecognised option --standard-json");
                }
                other => panic!("expected Exited, got {other:?}"),
            }
        }
    }
}
