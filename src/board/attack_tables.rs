//! Precomputed attack masks for leapers and rays for sliders.

use once_cell::sync::Lazy;

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn on_board(r: isize, f: isize) -> bool {
    (0..8).contains(&r) && (0..8).contains(&f)
}

fn leaper_table(deltas: &[(isize, isize)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, mask) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        for &(dr, df) in deltas {
            if on_board(r + dr, f + df) {
                *mask |= 1u64 << ((r + dr) * 8 + f + df);
            }
        }
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(crate) static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

/// `PAWN_ATTACKS[color][sq]`: squares a pawn of `color` on `sq` attacks.
pub(crate) static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> =
    Lazy::new(|| [leaper_table(&[(1, -1), (1, 1)]), leaper_table(&[(-1, -1), (-1, 1)])]);

const DIR_N: usize = 0;
const DIR_S: usize = 1;
const DIR_E: usize = 2;
const DIR_W: usize = 3;
const DIR_NE: usize = 4;
const DIR_NW: usize = 5;
const DIR_SE: usize = 6;
const DIR_SW: usize = 7;

const ROOK_DIRS: [usize; 4] = [DIR_N, DIR_S, DIR_E, DIR_W];
const BISHOP_DIRS: [usize; 4] = [DIR_NE, DIR_NW, DIR_SE, DIR_SW];

static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    let dirs = [
        (1, 0),   // N
        (-1, 0),  // S
        (0, 1),   // E
        (0, -1),  // W
        (1, 1),   // NE
        (1, -1),  // NW
        (-1, 1),  // SE
        (-1, -1), // SW
    ];
    for sq in 0..64 {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        for (d, (dr, df)) in dirs.iter().enumerate() {
            let mut mask = 0u64;
            let mut nr = r + dr;
            let mut nf = f + df;
            while on_board(nr, nf) {
                mask |= 1u64 << (nr * 8 + nf);
                nr += dr;
                nf += df;
            }
            rays[d][sq] = mask;
        }
    }
    rays
});

fn is_increasing_dir(dir: usize) -> bool {
    matches!(dir, DIR_N | DIR_E | DIR_NE | DIR_NW)
}

fn ray_attacks(from_idx: usize, dir: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][from_idx];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    let blocker_idx = if is_increasing_dir(dir) {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[dir][blocker_idx]
}

/// Sliding attacks from `from_idx`, stopping at (and including) the first
/// blocker on each ray.
pub(crate) fn slider_attacks(from_idx: usize, occupancy: u64, bishop: bool) -> u64 {
    let dirs = if bishop { &BISHOP_DIRS } else { &ROOK_DIRS };
    dirs.iter()
        .fold(0u64, |acc, &dir| acc | ray_attacks(from_idx, dir, occupancy))
}
