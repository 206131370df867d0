//! IMA-ADPCM block decoder (WAVE_FORMAT_IMA_ADPCM, 4 bits per sample)
//!
//! Block layout, per channel: a 4-byte header (`i16` predictor, step
//! index, reserved zero byte), then groups of 4 bytes per channel holding
//! 8 nibbles each, low nibble first. The header predictor is the first
//! output sample of the block.

use super::decoder::BlockCodec;

/// Standard IMA step sizes.
#[rustfmt::skip]
static STEP_TABLE: [i32; 89] = [
    7, 8, 9, 10, 11, 12, 13, 14,
    16, 17, 19, 21, 23, 25, 28, 31,
    34, 37, 41, 45, 50, 55, 60, 66,
    73, 80, 88, 97, 107, 118, 130, 143,
    157, 173, 190, 209, 230, 253, 279, 307,
    337, 371, 408, 449, 494, 544, 598, 658,
    724, 796, 876, 963, 1060, 1166, 1282, 1411,
    1552, 1707, 1878, 2066, 2272, 2499, 2749, 3024,
    3327, 3660, 4026, 4428, 4871, 5358, 5894, 6484,
    7132, 7845, 8630, 9493, 10442, 11487, 12635, 13899,
    15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794,
    32767,
];

/// Step index adjustment by nibble magnitude.
#[rustfmt::skip]
static INDEX_TABLE: [i32; 8] = [
    -1, -1, -1, -1, 2, 4, 6, 8,
];

const MAX_STEP_INDEX: i32 = 88;
const HEADER_BYTES: usize = 4;
const GROUP_BYTES: usize = 4;
const SAMPLES_PER_GROUP: usize = 8;

/// Running predictor state of one channel
#[derive(Debug, Clone, Copy)]
struct ChannelState {
    predictor: i32,
    index: i32,
}

impl ChannelState {
    fn expand(&mut self, nibble: u8) -> i16 {
        let step = STEP_TABLE[self.index as usize];
        let mut delta = step >> 3;
        if nibble & 1 != 0 {
            delta += step >> 2;
        }
        if nibble & 2 != 0 {
            delta += step >> 1;
        }
        if nibble & 4 != 0 {
            delta += step;
        }

        if nibble & 8 != 0 {
            self.predictor -= delta;
        } else {
            self.predictor += delta;
        }

        self.index = (self.index + INDEX_TABLE[(nibble & 7) as usize]).clamp(0, MAX_STEP_INDEX);
        self.predictor = self.predictor.clamp(i16::MIN as i32, i16::MAX as i32);
        self.predictor as i16
    }
}

/// Stateless IMA-ADPCM block codec
#[derive(Debug, Clone, Copy, Default)]
pub struct ImaAdpcmCodec;

impl ImaAdpcmCodec {
    pub fn new() -> Self {
        Self
    }
}

impl BlockCodec for ImaAdpcmCodec {
    fn name(&self) -> &'static str {
        "ima-adpcm"
    }

    /// Decodes whole 4-byte groups only; a trailing partial group is
    /// ignored. Rejects the block when a header is short, a step index is
    /// out of range or a reserved byte is set.
    fn decode_block(&mut self, output: &mut [i16], input: &[u8], channels: usize) -> usize {
        if channels == 0 || input.len() < HEADER_BYTES * channels || output.len() < channels {
            return 0;
        }

        let mut states = Vec::with_capacity(channels);
        for (ch, header) in input.chunks_exact(HEADER_BYTES).take(channels).enumerate() {
            let predictor = i16::from_le_bytes([header[0], header[1]]);
            let index = header[2];
            if index as i32 > MAX_STEP_INDEX || header[3] != 0 {
                return 0;
            }
            output[ch] = predictor;
            states.push(ChannelState {
                predictor: predictor as i32,
                index: index as i32,
            });
        }

        let body = &input[HEADER_BYTES * channels..];
        let group_span = GROUP_BYTES * channels;
        let room = (output.len() / channels - 1) / SAMPLES_PER_GROUP;
        let groups = (body.len() / group_span).min(room);

        for (g, group) in body.chunks_exact(group_span).take(groups).enumerate() {
            let base = channels + g * SAMPLES_PER_GROUP * channels;
            for (ch, bytes) in group.chunks_exact(GROUP_BYTES).enumerate() {
                let state = &mut states[ch];
                for (i, &byte) in bytes.iter().enumerate() {
                    output[base + ch + i * 2 * channels] = state.expand(byte & 0x0f);
                    output[base + ch + (i * 2 + 1) * channels] = state.expand(byte >> 4);
                }
            }
        }

        1 + groups * SAMPLES_PER_GROUP
    }
}
