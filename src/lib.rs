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

//
// MuSig: Schnorr multi-signatures via Ristretto
//

//! A Rust implementation of Schnorr signing, key aggregation and the
//! three-round MuSig cosigning protocol over the Ristretto group.
//!
//! Implementation for Ristretto Schnorr signatures of
//! "Simple Schnorr Multi-Signatures with Applications to Bitcoin" by
//! Gregory Maxwell, Andrew Poelstra, Yannick Seurin, and Pieter Wuille
//! https://eprint.iacr.org/2018/068
//!
//! We observe the security arguments from the
//! [original 2-round version](https://eprint.iacr.org/2018/068/20180118:124757)
//! were found lacking in
//! "On the Provable Security of Two-Round Multi-Signatures" by
//! Manu Drijvers, Kasra Edalatnejad, Bryan Ford, and Gregory Neven
//! https://eprint.iacr.org/2018/417
//! so we implement only the
//! [3-round version](https://eprint.iacr.org/2018/068/20180520:191909).
//!
//! An aggregated signature produced by any number of cosigners is a plain
//! 64-byte Schnorr signature that verifies against the aggregated key, so a
//! verifier cannot tell how many parties were involved. All challenges are
//! derived through a Merlin transcript, which gives every protocol message
//! a label and a domain separator.

#[macro_use]
mod ser;

pub mod errors;
pub mod tools;

mod keys;
mod musig;
mod signature;

pub use crate::errors::SchnorrError;
pub use crate::keys::{
    Keypair, Multikey, PublicKey, SecretKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
};
pub use crate::musig::{
    NonceCommitment, NoncePrecommitment, Party, PartyAwaitingCommitments,
    PartyAwaitingPrecommitments, PartyAwaitingShares, Share,
};
pub use crate::signature::{Signature, SIGNATURE_LENGTH};
pub use crate::tools::{SigningContext, TranscriptProtocol};
