//! Transposition table for caching search results.
//!
//! Entries are stored as atomic u64 pairs using XOR verification, so the
//! table can be shared with the search thread without locks. A torn read
//! fails verification and is treated as a miss.

use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::board::Move;

/// Default size in megabytes (the `Hash` option default).
pub const DEFAULT_TT_MB: usize = 16;
/// Smallest accepted `Hash` value.
pub const MIN_TT_MB: usize = 1;
/// Largest accepted `Hash` value.
pub const MAX_TT_MB: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Failed high: score >= beta
    UpperBound, // Failed low: score <= alpha
}

impl BoundType {
    fn to_bits(self) -> u64 {
        match self {
            BoundType::Exact => 0,
            BoundType::LowerBound => 1,
            BoundType::UpperBound => 2,
        }
    }

    fn from_bits(v: u64) -> Self {
        match v & 0x3 {
            0 => BoundType::Exact,
            1 => BoundType::LowerBound,
            _ => BoundType::UpperBound,
        }
    }
}

/// Unpacked entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i16,
    pub bound_type: BoundType,
    pub best_move: Option<Move>,
    pub generation: u8,
}

const MOVE_BITS: u64 = 0xF_FFFF;
const SCORE_SHIFT: u32 = 20;
const DEPTH_SHIFT: u32 = 36;
const BOUND_SHIFT: u32 = 44;
const GEN_SHIFT: u32 = 46;
/// Marks a slot as written, so an all-zero entry is never valid data
const USED_BIT: u64 = 1 << 63;

/// Packed entry format:
/// - bits 0-19:  codec move (0 = no move)
/// - bits 20-35: score (i16 as u16)
/// - bits 36-43: depth
/// - bits 44-45: bound
/// - bits 46-51: generation
/// - bit 63:     used marker
fn pack_entry(entry: &TTEntry) -> u64 {
    let mv = entry.best_move.map_or(0, |m| u64::from(m.as_u32()) & MOVE_BITS);
    mv | (u64::from(entry.score as u16) << SCORE_SHIFT)
        | (u64::from(entry.depth) << DEPTH_SHIFT)
        | (entry.bound_type.to_bits() << BOUND_SHIFT)
        | (u64::from(entry.generation & 0x3F) << GEN_SHIFT)
        | USED_BIT
}

fn unpack_entry(data: u64) -> TTEntry {
    let mv_bits = (data & MOVE_BITS) as u32;
    TTEntry {
        depth: ((data >> DEPTH_SHIFT) & 0xFF) as u8,
        score: ((data >> SCORE_SHIFT) & 0xFFFF) as u16 as i16,
        bound_type: BoundType::from_bits(data >> BOUND_SHIFT),
        best_move: (mv_bits != 0).then(|| Move::from_u32(mv_bits)),
        generation: ((data >> GEN_SHIFT) & 0x3F) as u8,
    }
}

/// A single slot: stores `hash ^ data` and `data`.
#[repr(C)]
struct TTSlot {
    key_xor: AtomicU64,
    data: AtomicU64,
}

impl TTSlot {
    fn new() -> Self {
        TTSlot {
            key_xor: AtomicU64::new(0),
            data: AtomicU64::new(0),
        }
    }

    fn store(&self, hash: u64, packed: u64) {
        self.data.store(packed, Ordering::Relaxed);
        self.key_xor.store(hash ^ packed, Ordering::Relaxed);
    }

    fn probe(&self, hash: u64) -> Option<TTEntry> {
        let key_xor = self.key_xor.load(Ordering::Relaxed);
        let data = self.data.load(Ordering::Relaxed);
        if data != 0 && key_xor ^ data == hash {
            Some(unpack_entry(data))
        } else {
            None
        }
    }

    fn is_empty(&self) -> bool {
        self.data.load(Ordering::Relaxed) == 0
    }

    fn clear(&self) {
        self.key_xor.store(0, Ordering::Relaxed);
        self.data.store(0, Ordering::Relaxed);
    }
}

const BUCKET_SIZE: usize = 4;

#[repr(C)]
struct TTBucket {
    slots: [TTSlot; BUCKET_SIZE],
}

impl TTBucket {
    fn new() -> Self {
        TTBucket {
            slots: std::array::from_fn(|_| TTSlot::new()),
        }
    }
}

/// Lock-free transposition table shared between the session and the search
/// thread.
pub struct TranspositionTable {
    buckets: Vec<TTBucket>,
    mask: usize,
    size_mb: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes, clamped to the
    /// accepted `Hash` range.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let size_mb = size_mb.clamp(MIN_TT_MB, MAX_TT_MB);
        let bucket_size = mem::size_of::<TTBucket>();
        let wanted = (size_mb * 1024 * 1024) / bucket_size;
        // Largest power of two that fits
        let num_buckets = (wanted.next_power_of_two() / 2).max(1024);

        let buckets = (0..num_buckets).map(|_| TTBucket::new()).collect();
        TranspositionTable {
            buckets,
            mask: num_buckets - 1,
            size_mb,
        }
    }

    #[must_use]
    pub fn size_mb(&self) -> usize {
        self.size_mb
    }

    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.buckets[self.index(hash)]
            .slots
            .iter()
            .find_map(|slot| slot.probe(hash))
    }

    /// Store an entry. Prefers an empty slot or the slot already holding
    /// this position; otherwise replaces the shallowest, oldest entry.
    pub fn store(
        &self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
        generation: u8,
    ) {
        let entry = TTEntry {
            depth: depth.min(255) as u8,
            score: score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16,
            bound_type,
            best_move,
            generation: generation & 0x3F,
        };
        let packed = pack_entry(&entry);
        let bucket = &self.buckets[self.index(hash)];

        for slot in &bucket.slots {
            if slot.is_empty() || slot.probe(hash).is_some() {
                slot.store(hash, packed);
                return;
            }
        }

        let replace = bucket
            .slots
            .iter()
            .min_by_key(|slot| {
                let old = unpack_entry(slot.data.load(Ordering::Relaxed));
                let age = entry.generation.wrapping_sub(old.generation) & 0x3F;
                i32::from(old.depth) * 2 - i32::from(age)
            })
            .unwrap_or(&bucket.slots[0]);
        replace.store(hash, packed);
    }

    /// Fullness in per mille (0-1000), sampled over the first 1000 buckets.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.buckets.len().min(1000);
        let occupied = self
            .buckets
            .iter()
            .take(sample)
            .flat_map(|b| b.slots.iter())
            .filter(|s| !s.is_empty())
            .count();
        ((occupied * 1000) / (sample * BUCKET_SIZE)) as u32
    }

    pub fn clear(&self) {
        for bucket in &self.buckets {
            for slot in &bucket.slots {
                slot.clear();
            }
        }
    }
}
