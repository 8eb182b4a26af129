// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors which may occur during key aggregation, cosigning and verification,
//! and when parsing keys or signatures from wire formats.

use failure::Fail;

/// Represents an error in key aggregation, signing, or verification.
#[derive(Fail, Clone, Debug, Eq, PartialEq)]
pub enum SchnorrError {
    /// This error occurs when a point is not a valid compressed Ristretto point
    #[fail(display = "Cannot decompress Ristretto point")]
    InvalidPoint,

    /// This error occurs when a scalar encoding is not canonical
    #[fail(display = "Cannot use a non-canonical scalar encoding")]
    InvalidScalar,

    /// The verification equation wasn't satisfied
    #[fail(display = "Verification equation was not satisfied")]
    BadSignature,

    /// This error occurs when a cosigner's precommitment, commitment or
    /// share fails to verify correctly
    #[fail(display = "Cosigner #{} violated the multi-signature protocol", index)]
    ShareError {
        /// The index of the cosigner whose message failed to verify
        index: usize,
    },

    /// The number of messages in a round does not match the number of cosigners
    #[fail(display = "Number of messages does not match the number of cosigners")]
    Arity,

    /// This error occurs when a function is called with bad arguments
    #[fail(display = "Function is called with bad arguments")]
    BadArguments,

    /// An input had the wrong length for the type being deserialized
    #[fail(display = "{} must be exactly {} bytes", name, length)]
    BytesLengthError {
        /// The name of the type being deserialized
        name: &'static str,
        /// The expected byte length
        length: usize,
    },
}

/// Convert errors into serde's deserialization error type.
pub(crate) fn serde_error_from_schnorr_error<E>(err: SchnorrError) -> E
where
    E: ::serde::de::Error,
{
    E::custom(format!("{}", err))
}
