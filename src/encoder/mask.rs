//! Mask selection: score all eight candidates, keep the cheapest.

use rayon::prelude::*;

use crate::encoder::canvas::Canvas;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const N1_BASE: u32 = 3;
const N2_BLOCK: u32 = 3;
const N3_FINDER_LIKE: u32 = 40;
const N4_STEP: u32 = 10;

/// Penalty breakdown for one masked symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Penalty {
    /// Runs of five or more same-colour modules
    pub n1: u32,
    /// Uniform 2x2 blocks
    pub n2: u32,
    /// Finder-like 1:1:3:1:1 patterns with a four-module light margin
    pub n3: u32,
    /// Dark/light imbalance
    pub n4: u32,
}

impl Penalty {
    /// Sum of the four rules
    pub fn total(&self) -> u32 {
        self.n1 + self.n2 + self.n3 + self.n4
    }
}

/// Score a complete symbol against the four penalty rules.
pub fn penalty_score(matrix: &BitMatrix) -> Penalty {
    let size = matrix.width();
    let mut penalty = Penalty::default();

    for i in 0..size {
        let row = matrix.row(i);
        let column = matrix.column(i);
        for line in [&row, &column] {
            penalty.n1 += run_penalty(line);
            penalty.n3 += finder_like_penalty(line);
        }
    }

    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let c = matrix.get(x, y);
            if c == matrix.get(x + 1, y) && c == matrix.get(x, y + 1) && c == matrix.get(x + 1, y + 1)
            {
                penalty.n2 += N2_BLOCK;
            }
        }
    }

    // k = ceil(|dark% - 50%| / 5%) - 1
    let total = size * size;
    if total > 0 {
        let dark = matrix.count_dark();
        let k = ((20 * dark).abs_diff(10 * total) + total - 1) / total;
        penalty.n4 = N4_STEP * k.saturating_sub(1) as u32;
    }

    penalty
}

fn run_penalty(line: &[bool]) -> u32 {
    let mut score = 0;
    let mut run = 0usize;
    let mut color = None;
    for &module in line.iter() {
        if color == Some(module) {
            run += 1;
        } else {
            score += run_score(run);
            color = Some(module);
            run = 1;
        }
    }
    score + run_score(run)
}

fn run_score(run: usize) -> u32 {
    if run >= 5 {
        N1_BASE + (run - 5) as u32
    } else {
        0
    }
}

/// Lengths of the last seven runs in a line, newest first.
///
/// The symbol is surrounded by light modules, so the first and last light
/// runs are extended by the line length.
struct RunHistory {
    border: usize,
    runs: [usize; 7],
}

impl RunHistory {
    fn new(border: usize) -> Self {
        Self {
            border,
            runs: [0; 7],
        }
    }

    fn push(&mut self, mut run: usize) {
        if self.runs[0] == 0 {
            run += self.border;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = run;
    }

    /// Occurrences of dark 1:1:3:1:1 ending at the newest light run, with at
    /// least four light units on one side and one on the other.
    fn finder_like(&self) -> u32 {
        let r = &self.runs;
        let n = r[1];
        let core = n > 0 && r[2] == n && r[3] == n * 3 && r[4] == n && r[5] == n;
        u32::from(core && r[0] >= n * 4 && r[6] >= n) + u32::from(core && r[6] >= n * 4 && r[0] >= n)
    }

    /// Close the line with the trailing light border and count once more.
    fn finish(mut self, dark: bool, mut run: usize) -> u32 {
        if dark {
            self.push(run);
            run = 0;
        }
        self.push(run + self.border);
        self.finder_like()
    }
}

fn finder_like_penalty(line: &[bool]) -> u32 {
    let mut history = RunHistory::new(line.len());
    let mut count = 0;
    let mut color = false;
    let mut run = 0;
    for &module in line {
        if module == color {
            run += 1;
            continue;
        }
        history.push(run);
        if !color {
            count += history.finder_like();
        }
        color = module;
        run = 1;
    }
    (count + history.finish(color, run)) * N3_FINDER_LIKE
}

/// Where the evaluator is in its selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskState {
    /// No candidate scored yet
    Unmasked,
    /// Most recently scored candidate
    Evaluating(MaskPattern),
    /// Mask committed to the symbol
    Selected(MaskPattern),
}

/// Scores mask candidates against an unmasked symbol with data placed.
#[derive(Debug, Clone)]
pub struct MaskEvaluator {
    base: Canvas,
    level: ECLevel,
    state: MaskState,
}

impl MaskEvaluator {
    /// Evaluator over `base`, format info stamped for `level`
    pub fn new(base: Canvas, level: ECLevel) -> Self {
        Self {
            base,
            level,
            state: MaskState::Unmasked,
        }
    }

    /// Current selection state
    pub fn state(&self) -> MaskState {
        self.state
    }

    /// Copy of the symbol with `mask` applied and its format/version info stamped
    fn candidate(&self, mask: MaskPattern) -> Canvas {
        let mut canvas = self.base.clone();
        canvas.apply_mask(mask);
        canvas.draw_format_info(self.level, mask);
        canvas.draw_version_info();
        canvas
    }

    fn score(&self, mask: MaskPattern) -> Penalty {
        let penalty = penalty_score(&self.candidate(mask).to_bit_matrix());
        tracing::trace!(
            mask = mask.id(),
            n1 = penalty.n1,
            n2 = penalty.n2,
            n3 = penalty.n3,
            n4 = penalty.n4,
            total = penalty.total(),
            "scored mask candidate"
        );
        penalty
    }

    /// Score a single candidate.
    pub fn evaluate(&mut self, mask: MaskPattern) -> Penalty {
        self.state = MaskState::Evaluating(mask);
        self.score(mask)
    }

    /// Score all eight candidates, in id order.
    pub fn evaluate_all(&mut self, parallel: bool) -> Vec<(MaskPattern, Penalty)> {
        let scores: Vec<(MaskPattern, Penalty)> = if parallel {
            MaskPattern::ALL[..]
                .par_iter()
                .map(|&mask| (mask, self.score(mask)))
                .collect()
        } else {
            MaskPattern::ALL
                .iter()
                .map(|&mask| (mask, self.evaluate(mask)))
                .collect()
        };
        if let Some(&(last, _)) = scores.last() {
            self.state = MaskState::Evaluating(last);
        }
        scores
    }

    /// Lowest total penalty; ties go to the lowest mask id.
    pub fn best(&mut self, parallel: bool) -> MaskPattern {
        self.evaluate_all(parallel)
            .into_iter()
            .min_by_key(|&(mask, penalty)| (penalty.total(), mask.id()))
            .map(|(mask, _)| mask)
            .unwrap_or(MaskPattern::Pattern0)
    }

    /// Apply `mask` permanently and stamp format/version information.
    pub fn commit(&mut self, mask: MaskPattern) -> Canvas {
        self.state = MaskState::Selected(mask);
        self.candidate(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::raw_data_modules;
    use crate::models::Version;

    fn line(s: &str) -> Vec<bool> {
        s.bytes().map(|b| b == b'1').collect()
    }

    #[test]
    fn test_run_penalty() {
        assert_eq!(run_penalty(&line("1111")), 0);
        assert_eq!(run_penalty(&line("11111")), 3);
        assert_eq!(run_penalty(&line("0000000")), 5);
        assert_eq!(run_penalty(&line("111110000001")), 3 + 4);
    }

    #[test]
    fn test_finder_like_penalty() {
        // four light modules on the left only
        assert_eq!(finder_like_penalty(&line("00001011101011")), 40);
        // both margins present: two occurrences
        assert_eq!(finder_like_penalty(&line("000010111010000")), 80);
        assert_eq!(finder_like_penalty(&line("0000101110111")), 0);
        assert_eq!(finder_like_penalty(&line("00001101110100")), 0);
    }

    #[test]
    fn test_finder_like_at_line_edge() {
        // the border outside the symbol counts as light
        assert_eq!(finder_like_penalty(&line("1011101")), 80);
        assert_eq!(finder_like_penalty(&line("10111010110")), 40);
        assert_eq!(finder_like_penalty(&line("0110101110100")), 40);
    }

    #[test]
    fn test_finder_like_scaled_runs() {
        // 2:2:6:2:2 with eight light modules on the right
        assert_eq!(
            finder_like_penalty(&line("011001100111111001100000000")),
            40
        );
    }

    #[test]
    fn test_balance_penalty() {
        let mut m = BitMatrix::square(10);
        // 0% dark: ceil(50 / 5) - 1
        assert_eq!(penalty_score(&m).n4, 90);
        for x in 0..10 {
            for y in 0..5 {
                m.set(x, y, true);
            }
        }
        assert_eq!(penalty_score(&m).n4, 0);
    }

    #[test]
    fn test_block_penalty() {
        let m = BitMatrix::square(3);
        assert_eq!(penalty_score(&m).n2, 4 * 3);
    }

    fn evaluator() -> MaskEvaluator {
        let version = Version::new(3).unwrap();
        let mut canvas = Canvas::with_function_patterns(version);
        let codewords: Vec<u8> = (0..raw_data_modules(version) / 8)
            .map(|i| (i * 37 % 251) as u8)
            .collect();
        canvas.place_data(&codewords).unwrap();
        MaskEvaluator::new(canvas, ECLevel::M)
    }

    #[test]
    fn test_best_mask_has_lowest_penalty() {
        let mut eval = evaluator();
        assert_eq!(eval.state(), MaskState::Unmasked);
        let scores = eval.evaluate_all(false);
        let best = eval.best(false);
        let best_total = scores[best.id() as usize].1.total();
        assert!(scores.iter().all(|(_, p)| best_total <= p.total()));
        let canvas = eval.commit(best);
        assert_eq!(eval.state(), MaskState::Selected(best));
        assert_eq!(
            penalty_score(&canvas.to_bit_matrix()).total(),
            best_total
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut eval = evaluator();
        assert_eq!(eval.evaluate_all(true), eval.evaluate_all(false));
        assert_eq!(eval.best(true), eval.best(false));
    }
}
