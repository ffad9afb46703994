//! Schema fingerprint
//!
//! Every field of the parameter table, then of the extended table, is
//! flattened to fixed-width little-endian `u32` words. Text is zero padded
//! to its bound, optional fields contribute a presence word, and `f64`
//! values contribute their low and high halves. The words are folded with
//! an FNV-1a style step seeded from the first word, so a change in any field,
//! entry count or entry order changes the result with high probability.
//!
//! This detects stale host caches. It is not a cryptographic digest.

use super::descriptor::{
    ParamDescriptor, ParamExDescriptor, EX_LABEL_LEN, PARAM_DESCRIPTION_LEN, PARAM_NAME_LEN,
    PARAM_UNITS_LEN,
};

/// FNV-1a 32-bit prime
const FNV_PRIME: u32 = 16777619;

/// Compute the fingerprint of a parameter table and its extended pages
pub fn fingerprint(params: &[ParamDescriptor], pages: &[ParamExDescriptor]) -> u32 {
    let mut fold = Fold::default();

    fold.word(params.len() as u32);
    for param in params {
        fold.word(param.id);
        fold.word(param.data_type as u32);
        fold.word(param.access.bits() as u32);
        fold.word(param.storage_class as u32);
        fold.text(Some(param.name), PARAM_NAME_LEN);
        fold.text(param.description, PARAM_DESCRIPTION_LEN);
        fold.text(param.units, PARAM_UNITS_LEN);
        fold.number(param.range_min);
        fold.number(param.range_max);
        fold.number(param.default_value);
    }

    fold.word(pages.len() as u32);
    for page in pages {
        fold.word(page.associated_pid);
        fold.word(page.data_type as u32);
        fold.word(page.labels.len() as u32);
        for label in page.labels {
            fold.word(label.value);
            fold.text(Some(label.label), EX_LABEL_LEN);
        }
    }

    fold.finish()
}

#[derive(Default)]
struct Fold {
    hash: Option<u32>,
}

impl Fold {
    fn word(&mut self, w: u32) {
        self.hash = Some(match self.hash {
            None => w,
            Some(h) => (h ^ w).wrapping_mul(FNV_PRIME),
        });
    }

    fn text(&mut self, text: Option<&str>, width: usize) {
        self.word(text.is_some() as u32);
        let bytes = text.map_or(&[][..], str::as_bytes);
        let mut offset = 0;
        while offset < width {
            let mut chunk = [0u8; 4];
            for (i, slot) in chunk.iter_mut().enumerate() {
                let pos = offset + i;
                if pos < width {
                    *slot = bytes.get(pos).copied().unwrap_or(0);
                }
            }
            self.word(u32::from_le_bytes(chunk));
            offset += 4;
        }
    }

    fn number(&mut self, value: Option<f64>) {
        self.word(value.is_some() as u32);
        let bits = value.map_or(0, f64::to_bits);
        self.word(bits as u32);
        self.word((bits >> 32) as u32);
    }

    fn finish(self) -> u32 {
        self.hash.unwrap_or(0)
    }
}
