//! Constructor argument coercion and ABI encoding.

use alloy::dyn_abi::{DynSolValue, JsonAbiExt, Specifier};
use alloy::json_abi::{JsonAbi, Param};

use crate::error::ArgumentError;

fn constructor_inputs(abi: &JsonAbi) -> &[Param] {
    abi.constructor()
        .map(|c| c.inputs.as_slice())
        .unwrap_or_default()
}

fn check_count(inputs: &[Param], found: usize) -> Result<(), ArgumentError> {
    if inputs.len() != found {
        return Err(ArgumentError::Count {
            expected: inputs.len(),
            found,
        });
    }
    Ok(())
}

/// ABI-encodes constructor arguments, without a selector.
///
/// A contract without a constructor accepts only an empty argument list,
/// which encodes to no bytes.
pub fn encode_constructor_args(
    abi: &JsonAbi,
    args: &[DynSolValue],
) -> Result<Vec<u8>, ArgumentError> {
    check_count(constructor_inputs(abi), args.len())?;
    match abi.constructor() {
        Some(constructor) => {
            constructor
                .abi_encode_input(args)
                .map_err(|e| ArgumentError::Encode {
                    reason: e.to_string(),
                })
        }
        None => Ok(Vec::new()),
    }
}

/// Parses textual arguments into values of the constructor's parameter types.
///
/// Addresses, integers, booleans, strings, bytes and arrays use the
/// `DynSolType::coerce_str` syntax, e.g. `1000`, `0x11..11`, `true`,
/// `[1,2]`.
pub fn coerce_constructor_args(
    abi: &JsonAbi,
    args: &[String],
) -> Result<Vec<DynSolValue>, ArgumentError> {
    let inputs = constructor_inputs(abi);
    check_count(inputs, args.len())?;
    inputs
        .iter()
        .zip(args)
        .enumerate()
        .map(|(index, (param, value))| {
            let coerce_err = |reason: String| ArgumentError::Coerce {
                index,
                value: value.clone(),
                ty: param.ty.clone(),
                reason,
            };
            let ty = param.resolve().map_err(|e| coerce_err(e.to_string()))?;
            ty.coerce_str(value).map_err(|e| coerce_err(e.to_string()))
        })
        .collect()
}
