//! Constructor argument parsing and encoding.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;

use crate::ArtifactError;

/// Constructor parameters as `(name, type)` in declaration order.
///
/// A contract without an explicit constructor has none.
pub fn constructor_params(abi: &JsonAbi) -> Result<Vec<(String, DynSolType)>, ArtifactError> {
    let Some(constructor) = abi.constructor() else {
        return Ok(Vec::new());
    };

    constructor
        .inputs
        .iter()
        .map(|param| -> Result<_, ArtifactError> { Ok((param.name.clone(), param.resolve()?)) })
        .collect()
}

/// Coerces command-line strings to the constructor's parameter types.
pub fn parse_constructor_args(
    abi: &JsonAbi,
    raw: &[String],
) -> Result<Vec<DynSolValue>, ArtifactError> {
    let params = constructor_params(abi)?;
    if params.len() != raw.len() {
        return Err(ArtifactError::ArgumentCount { expected: params.len(), actual: raw.len() });
    }

    params
        .iter()
        .zip(raw)
        .enumerate()
        .map(|(index, ((name, ty), value))| {
            ty.coerce_str(value).map_err(|err| ArtifactError::InvalidArgument {
                index,
                name: name.clone(),
                ty: ty.sol_type_name().into_owned(),
                reason: err.to_string(),
            })
        })
        .collect()
}

/// ABI-encodes constructor arguments after checking them against the ABI.
///
/// The result is what follows the creation code in a deployment transaction.
pub fn encode_constructor_args(
    abi: &JsonAbi,
    args: &[DynSolValue],
) -> Result<Bytes, ArtifactError> {
    let params = constructor_params(abi)?;
    if params.len() != args.len() {
        return Err(ArtifactError::ArgumentCount { expected: params.len(), actual: args.len() });
    }
    if args.is_empty() {
        return Ok(Bytes::new());
    }

    for (index, ((name, ty), value)) in params.iter().zip(args).enumerate() {
        if !ty.matches(value) {
            return Err(ArtifactError::InvalidArgument {
                index,
                name: name.clone(),
                ty: ty.sol_type_name().into_owned(),
                reason: format!("got a {} value", describe(value)),
            });
        }
    }

    Ok(DynSolValue::Tuple(args.to_vec()).abi_encode_params().into())
}

fn describe(value: &DynSolValue) -> String {
    value.sol_type_name().map_or_else(|| "tuple".to_string(), |name| name.into_owned())
}
