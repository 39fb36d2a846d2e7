//! Poseidon2 permutation over Goldilocks (width 12) and the padding-free
//! sponge built on it.
//!
//! The permutation is an initial external linear layer, four full rounds,
//! twenty-two partial rounds and four more full rounds, with the S-box
//! `x -> x^7`. The sponge overwrites the rate portion of the state with each
//! input block; inputs are never padded, so callers hash fixed-shape data.

use curve::{BaseField, Goldilocks};

use crate::constants::{
    EXTERNAL_CONSTANTS, HALF_FULL_ROUNDS, INTERNAL_CONSTANTS, MATRIX_DIAG_12, PARTIAL_ROUNDS,
    POSEIDON2_RATE, POSEIDON2_WIDTH,
};

/// Sponge state.
pub type State = [Goldilocks; POSEIDON2_WIDTH];

/// Applies the Poseidon2 permutation in place.
pub fn permute(state: &mut State) {
    external_linear_layer(state);
    full_rounds(state, 0);
    partial_rounds(state);
    full_rounds(state, HALF_FULL_ROUNDS);
}

/// Absorbs `input` in blocks of [`POSEIDON2_RATE`] elements, permuting after
/// every block, then squeezes `num_outputs` elements.
///
/// An empty input absorbs nothing, so the output is read from the zero state.
pub fn hash_to_field(input: &[Goldilocks], num_outputs: usize) -> Vec<Goldilocks> {
    let mut state = [Goldilocks::ZERO; POSEIDON2_WIDTH];

    for block in input.chunks(POSEIDON2_RATE) {
        state[..block.len()].copy_from_slice(block);
        permute(&mut state);
    }

    let mut outputs = Vec::with_capacity(num_outputs);
    loop {
        for &element in state.iter().take(POSEIDON2_RATE) {
            if outputs.len() == num_outputs {
                return outputs;
            }
            outputs.push(element);
        }
        if outputs.len() == num_outputs {
            return outputs;
        }
        permute(&mut state);
    }
}

/// Hashes to a single extension field element (five outputs).
pub fn hash_to_quintic_extension(input: &[Goldilocks]) -> BaseField {
    let digest = hash_to_field(input, 5);
    BaseField::new([digest[0], digest[1], digest[2], digest[3], digest[4]])
}

fn full_rounds(state: &mut State, start: usize) {
    for round in start..start + HALF_FULL_ROUNDS {
        for (element, &constant) in state.iter_mut().zip(EXTERNAL_CONSTANTS[round].iter()) {
            *element = sbox(*element + Goldilocks::new(constant));
        }
        external_linear_layer(state);
    }
}

fn partial_rounds(state: &mut State) {
    for &constant in INTERNAL_CONSTANTS.iter().take(PARTIAL_ROUNDS) {
        state[0] = sbox(state[0] + Goldilocks::new(constant));
        internal_linear_layer(state);
    }
}

#[inline]
fn sbox(x: Goldilocks) -> Goldilocks {
    let x3 = x.square() * x;
    x3.square() * x
}

/// Applies the circulant 4x4 block
/// ```text
/// [2 3 1 1]
/// [1 2 3 1]
/// [1 1 2 3]
/// [3 1 1 2]
/// ```
/// to each group of four, then adds the column sums across the groups.
fn external_linear_layer(state: &mut State) {
    for chunk in state.chunks_exact_mut(4) {
        let t0 = chunk[0] + chunk[1];
        let t1 = chunk[2] + chunk[3];
        let t2 = t0 + t1;
        let t3 = t2 + chunk[1];
        let t4 = t2 + chunk[3];
        let t5 = chunk[0].double();
        let t6 = chunk[2].double();

        chunk[0] = t3 + t0;
        chunk[1] = t6 + t3;
        chunk[2] = t1 + t4;
        chunk[3] = t5 + t4;
    }

    let sums: [Goldilocks; 4] =
        core::array::from_fn(|col| state[col] + state[col + 4] + state[col + 8]);
    for (i, element) in state.iter_mut().enumerate() {
        *element += sums[i % 4];
    }
}

fn internal_linear_layer(state: &mut State) {
    let sum: Goldilocks = state.iter().copied().sum();
    for (element, &diag) in state.iter_mut().zip(MATRIX_DIAG_12.iter()) {
        *element = *element * Goldilocks::new(diag) + sum;
    }
}
