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

//! The three-round MuSig cosigning protocol.
//!
//! Cosigners agree out-of-band on an ordered list of public keys and on
//! a transcript with the message absorbed, then walk three rounds:
//!
//!   1. every party broadcasts a precommitment `H(R_i)` to its nonce;
//!   2. once all precommitments arrived, every party reveals `R_i`,
//!      and each opening is checked against round one;
//!   3. every party broadcasts its share `s_i = r_i + c * a_i * x_i`,
//!      each share is checked, and `(sum R_i, sum s_i)` is the final
//!      signature.
//!
//! Precommitting to the nonces closes the class of attacks where the
//! last party to reveal chooses its nonce as a function of everyone
//! else's. The exchanged vectors are always ordered like the key list,
//! and every party validates its own entry in each broadcast as a
//! cheap integrity check on the batch.

mod commitment;
pub use commitment::{NonceCommitment, NoncePrecommitment, Share};

mod counterparty;

mod party;
pub use party::{
    Party, PartyAwaitingCommitments, PartyAwaitingPrecommitments, PartyAwaitingShares,
};
