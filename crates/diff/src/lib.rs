//! Line-level diff between two text versions
//!
//! Computes a longest-common-subsequence edit script at line
//! granularity and classifies contiguous runs of lines as added,
//! removed, or unchanged. This crate is pure computation: no I/O, no
//! storage types, so the algorithm can be tested in isolation.

/// Classification of a diff segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Lines present only in the new text
    Added,
    /// Lines present only in the old text
    Removed,
    /// Lines present in both texts
    Unchanged,
}

/// A contiguous run of equally-classified lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Kind of run
    pub kind: SegmentKind,
    /// The run's text, line terminators included
    pub text: String,
}

impl Segment {
    fn new(kind: SegmentKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// Split text into lines, keeping the trailing `\n` on each line.
///
/// A final line without a terminator is kept as-is, so concatenating
/// the pieces always reproduces the input exactly.
fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Compute the line-level diff between two texts.
///
/// Segments are emitted in top-to-bottom scan order; within a
/// replacement region removed lines precede added lines, matching
/// conventional unified-diff ordering. Output is deterministic for
/// identical inputs.
///
/// Identical non-empty texts produce a single `Unchanged` segment
/// spanning the whole text; two empty texts produce no segments.
pub fn diff_lines(old: &str, new: &str) -> Vec<Segment> {
    if old == new {
        if old.is_empty() {
            return Vec::new();
        }
        return vec![Segment::new(SegmentKind::Unchanged, old.to_string())];
    }

    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let ops = edit_script(&old_lines, &new_lines);
    coalesce(&ops, &old_lines, &new_lines)
}

/// One step of the edit script, referring to a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    /// Index into the old lines
    Remove(usize),
    /// Index into the new lines
    Add(usize),
    /// Index into the old lines (content identical in both)
    Keep(usize),
}

/// Build the per-line edit script via an LCS table.
///
/// `lcs[i][j]` holds the LCS length of `old[i..]` and `new[j..]`.
/// The forward walk prefers removals over additions on ties, which
/// puts removed lines before added lines inside a replacement region.
fn edit_script(old: &[&str], new: &[&str]) -> Vec<Op> {
    let n = old.len();
    let m = new.len();

    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let mut i = 0;
    let mut j = 0;
    while i < n && j < m {
        if old[i] == new[j] {
            ops.push(Op::Keep(i));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(Op::Remove(i));
            i += 1;
        } else {
            ops.push(Op::Add(j));
            j += 1;
        }
    }
    while i < n {
        ops.push(Op::Remove(i));
        i += 1;
    }
    while j < m {
        ops.push(Op::Add(j));
        j += 1;
    }

    ops
}

/// Merge consecutive same-kind ops into text segments
fn coalesce(ops: &[Op], old: &[&str], new: &[&str]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    for op in ops {
        let (kind, line) = match *op {
            Op::Keep(i) => (SegmentKind::Unchanged, old[i]),
            Op::Remove(i) => (SegmentKind::Removed, old[i]),
            Op::Add(j) => (SegmentKind::Added, new[j]),
        };

        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(line),
            _ => segments.push(Segment::new(kind, line.to_string())),
        }
    }

    segments
}
