//! Run-length compression for absent fields.
//!
//! An absent field is written as a single `0`, and partial dates leave a lot
//! of them lying around. A run of two to seven zeros collapses into one
//! marker character; longer runs are written as the seven-zero marker
//! followed by the leftover zeros, so the marker set never has to grow.

/// The placeholder written for an absent field.
pub const ZERO: char = '0';

/// The marker for a run of seven zeros. On its own, it is the encoding of
/// an empty value.
pub const SEVEN_ZEROS: char = '&';

/// Markers indexed by run length minus one. A lone zero is its own marker.
const MARKERS: [char; 7] = [ZERO, '.', ':', ';', '?', '!', SEVEN_ZEROS];


/// Collapses each run of `0` characters into its marker.
///
/// ### Examples
///
/// ```
/// use bitdt::zeros::compress;
///
/// assert_eq!(compress("000OAA0"), ":OAA0");
/// assert_eq!(compress("0000000"), "&");
/// assert_eq!(compress("000000000"), "&00");
/// ```
pub fn compress(fields: &str) -> String {
    let mut compressed = String::with_capacity(fields.len());
    let mut run = 0;

    for c in fields.chars() {
        if c == ZERO {
            run += 1;
        }
        else {
            push_run(&mut compressed, run);
            run = 0;
            compressed.push(c);
        }
    }

    push_run(&mut compressed, run);
    compressed
}

fn push_run(out: &mut String, run: usize) {
    match run {
        0 => {},
        1 ..= 7 => out.push(MARKERS[run - 1]),
        _ => {
            out.push(SEVEN_ZEROS);
            out.extend(std::iter::repeat(ZERO).take(run - MARKERS.len()));
        }
    }
}

/// Expands every marker back into its run of zeros. Other characters pass
/// through unchanged.
pub fn expand(compressed: &str) -> String {
    let mut expanded = String::with_capacity(compressed.len() + MARKERS.len());

    for c in compressed.chars() {
        match run_length(c) {
            Some(run) => expanded.extend(std::iter::repeat(ZERO).take(run)),
            None      => expanded.push(c),
        }
    }

    expanded
}

/// Returns whether the character stands for one or more zeros.
pub fn is_marker(c: char) -> bool {
    run_length(c).is_some()
}

fn run_length(c: char) -> Option<usize> {
    MARKERS.iter().position(|&m| m == c).map(|index| index + 1)
}
