//! # Miller 指数候选生成
//!
//! 枚举 `0..N` 范围内的所有 (h, k, l) 三元组，规约为升序的规范形式并去重。
//!
//! ## 算法概述
//! 1. 按 h → k → l 嵌套遍历
//! 2. 每个三元组排序得到规范形式
//! 3. 按值剔除 (0,0,0)
//! 4. 以规范三元组为键的哈希集合去重，保留首次出现顺序
//!
//! 只生成非负指数，不做符号变体的去重。
//!
//! ## 依赖关系
//! - 被 `indexing/parity.rs`, `indexing/pipeline.rs` 使用

use std::collections::HashSet;
use std::fmt;

/// Miller 指数 (h, k, l)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MillerIndex {
    pub h: i32,
    pub k: i32,
    pub l: i32,
}

impl MillerIndex {
    pub const ZERO: MillerIndex = MillerIndex { h: 0, k: 0, l: 0 };

    pub fn new(h: i32, k: i32, l: i32) -> Self {
        Self { h, k, l }
    }

    /// 规范形式：分量升序排列
    pub fn canonical(&self) -> Self {
        let mut c = [self.h, self.k, self.l];
        c.sort_unstable();
        Self::new(c[0], c[1], c[2])
    }

    pub fn components(&self) -> [i32; 3] {
        [self.h, self.k, self.l]
    }

    /// h² + k² + l²
    pub fn squared_sum(&self) -> i64 {
        self.components()
            .iter()
            .map(|&c| (c as i64) * (c as i64))
            .sum()
    }

    /// 倒格矢模长 g_hkl = sqrt(h² + k² + l²)
    pub fn reciprocal_magnitude(&self) -> f64 {
        (self.squared_sum() as f64).sqrt()
    }
}

impl fmt::Display for MillerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.h, self.k, self.l)
    }
}

impl From<[i32; 3]> for MillerIndex {
    fn from(c: [i32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// 候选 Miller 指数生成器
#[derive(Debug, Clone, Copy)]
pub struct CandidateIndexGenerator {
    /// 指数上界 N（分量取 0..N）
    bound: u16,
}

impl CandidateIndexGenerator {
    pub fn new(bound: u16) -> Self {
        Self { bound }
    }

    /// 生成规范化、去重后的候选指数集合
    ///
    /// `bound == 0` 时返回空集合。
    pub fn generate(&self) -> Vec<MillerIndex> {
        let n = i32::from(self.bound);
        let mut seen = HashSet::new();
        let mut indices = Vec::new();

        for h in 0..n {
            for k in 0..n {
                for l in 0..n {
                    let plane = MillerIndex::new(h, k, l).canonical();

                    // 零级面按值剔除
                    if plane == MillerIndex::ZERO {
                        continue;
                    }

                    if seen.insert(plane) {
                        indices.push(plane);
                    }
                }
            }
        }

        indices
    }

    /// 规范集合大小上界 C(N+2, 3) - 1
    pub fn max_candidates(&self) -> usize {
        let n = usize::from(self.bound);
        if n == 0 {
            return 0;
        }
        n * (n + 1) * (n + 2) / 6 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_n3_fixture() {
        let expected: Vec<MillerIndex> = [
            [0, 0, 1],
            [0, 0, 2],
            [0, 1, 1],
            [0, 1, 2],
            [0, 2, 2],
            [1, 1, 1],
            [1, 1, 2],
            [1, 2, 2],
            [2, 2, 2],
        ]
        .into_iter()
        .map(MillerIndex::from)
        .collect();

        let generated = CandidateIndexGenerator::new(3).generate();
        assert_eq!(generated, expected);
    }

    #[test]
    fn test_generate_excludes_zero_and_is_canonical() {
        let generated = CandidateIndexGenerator::new(5).generate();
        assert!(!generated.contains(&MillerIndex::ZERO));
        assert!(generated.iter().all(|p| *p == p.canonical()));
        assert_eq!(
            generated.len(),
            CandidateIndexGenerator::new(5).max_candidates()
        );
    }

    #[test]
    fn test_generate_empty_bound() {
        assert!(CandidateIndexGenerator::new(0).generate().is_empty());
        // N = 1 只有 (0,0,0)
        assert!(CandidateIndexGenerator::new(1).generate().is_empty());
    }

    #[test]
    fn test_canonicalize_idempotent() {
        let generated = CandidateIndexGenerator::new(4).generate();
        let again: Vec<MillerIndex> = generated.iter().map(MillerIndex::canonical).collect();
        assert_eq!(again, generated);
    }

    #[test]
    fn test_canonical_permutation_invariant() {
        let perms = [
            [1, 2, 3],
            [1, 3, 2],
            [2, 1, 3],
            [2, 3, 1],
            [3, 1, 2],
            [3, 2, 1],
        ];
        for p in perms {
            assert_eq!(MillerIndex::from(p).canonical(), MillerIndex::new(1, 2, 3));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(MillerIndex::new(1, 1, 1).to_string(), "(1, 1, 1)");
    }
}
