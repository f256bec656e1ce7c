//! Contract naming and `pragma solidity` version extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Extension stripped from a source base name to get the contract name.
const SOURCE_SUFFIX: &str = ".sol";

static VERSION_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"solidity\s\^?([0-9]{1,2}\.[0-9]{1,2}\.[0-9]{1,2})").expect("valid regex")
});

/// Derives a contract name from its source base name: `Token.sol` -> `Token`.
pub fn contract_name(base_name: &str) -> &str {
    base_name.strip_suffix(SOURCE_SUFFIX).unwrap_or(base_name)
}

/// Returns the first compiler version named after a `solidity` keyword.
///
/// Accepts `solidity 0.4.11` and `solidity ^0.4.11`. Range expressions such
/// as `>=0.4.0 <0.5.0` are not recognized.
pub fn parse_solidity_version(source: &str) -> Option<&str> {
    VERSION_DIRECTIVE
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_sol_extension() {
        assert_eq!(contract_name("Foo.sol"), "Foo");
        assert_eq!(contract_name("Foo"), "Foo");
        assert_eq!(contract_name("My.Token.sol"), "My.Token");
    }

    #[test]
    fn parses_caret_version() {
        let src = "pragma solidity ^0.4.11; contract Foo {}";
        assert_eq!(parse_solidity_version(src), Some("0.4.11"));
    }

    #[test]
    fn parses_exact_version() {
        let src = "pragma solidity 0.4.18;\ncontract Foo {}";
        assert_eq!(parse_solidity_version(src), Some("0.4.18"));
    }

    #[test]
    fn first_directive_wins() {
        let src = "pragma solidity 0.4.10;\n// solidity 0.4.24\n";
        assert_eq!(parse_solidity_version(src), Some("0.4.10"));
    }

    #[test]
    fn missing_directive() {
        assert_eq!(parse_solidity_version("contract Foo {}"), None);
        assert_eq!(parse_solidity_version("pragma solidity >=0.4.0;"), None);
    }
}
