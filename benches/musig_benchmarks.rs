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

#[macro_use]
extern crate criterion;

mod musig_benches {
    use criterion::Criterion;
    use musig::*;

    fn sign(c: &mut Criterion) {
        let keypair: Keypair = Keypair::generate(&mut rand::thread_rng());
        let ctx = SigningContext::new(b"this signature does this thing");

        c.bench_function("Schnorr signing", move |b| {
            b.iter(|| keypair.sign(ctx.bytes(b"yummy")))
        });
    }

    fn verify(c: &mut Criterion) {
        let keypair: Keypair = Keypair::generate(&mut rand::thread_rng());
        let ctx = SigningContext::new(b"this signature does this thing");
        let sig: Signature = keypair.sign(ctx.bytes(b"yummy"));

        c.bench_function("Schnorr signature verification", move |b| {
            b.iter(|| keypair.verify(ctx.bytes(b"yummy"), &sig))
        });
    }

    fn aggregate_keys(c: &mut Criterion) {
        let pubkeys: Vec<PublicKey> = (0..8)
            .map(|_| Keypair::generate(&mut rand::thread_rng()).public)
            .collect();

        c.bench_function("MuSig 8-key aggregation", move |b| {
            b.iter(|| Multikey::new(pubkeys.clone()).unwrap())
        });
    }

    fn two_party_session(c: &mut Criterion) {
        let keypairs: Vec<Keypair> = (0..2)
            .map(|_| Keypair::generate(&mut rand::thread_rng()))
            .collect();
        let pubkeys: Vec<PublicKey> = keypairs.iter().map(|k| k.public).collect();
        let ctx = SigningContext::new(b"this signature does this thing");

        c.bench_function("MuSig two-party signing session", move |b| {
            b.iter(|| {
                let multikey = Multikey::new(pubkeys.clone()).unwrap();

                let (parties, precommitments): (Vec<_>, Vec<_>) = keypairs
                    .iter()
                    .map(|k| {
                        Party::new(
                            ctx.bytes(b"yummy"),
                            k.secret.clone(),
                            multikey.clone(),
                            pubkeys.clone(),
                        )
                        .unwrap()
                    })
                    .unzip();

                let (parties, commitments): (Vec<_>, Vec<_>) = parties
                    .into_iter()
                    .map(|p| p.receive_precommitments(precommitments.clone()).unwrap())
                    .unzip();

                let (parties, shares): (Vec<_>, Vec<_>) = parties
                    .into_iter()
                    .map(|p| p.receive_commitments(commitments.clone()).unwrap())
                    .unzip();

                parties
                    .into_iter()
                    .map(|p| p.receive_shares(shares.clone()).unwrap())
                    .collect::<Vec<Signature>>()
            })
        });
    }

    criterion_group! {
        name = musig_benches;
        config = Criterion::default();
        targets =
            sign,
            verify,
            aggregate_keys,
            two_party_session,
    }
}

criterion_main!(musig_benches::musig_benches);
