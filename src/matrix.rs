//! Integer matrix kernel for the cipher.
//!
//! Determinants and cofactors are exact (recursive cofactor expansion over
//! `i128` with checked arithmetic). Real inversion runs Gauss–Jordan
//! elimination over `f64` and rounds back to integers. The modular inverse
//! used for decryption never touches floating point: it is built from the
//! integer cofactors reduced modulo the alphabet size.
//!
//! Cofactor expansion costs O(n!) and is kept on purpose: block sizes are
//! bounded by [`crate::MAX_BLOCK_SIZE`] before any matrix reaches this module.

use crate::error::{HillError, Result};
use std::fmt;

/// Pivots smaller than this are treated as zero during elimination
const PIVOT_EPSILON: f64 = 1e-9;

/// Dense row-major integer matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// Zero matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.set(i, i, 1);
        }
        m
    }

    /// Build from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            if row.len() != cols {
                return Err(HillError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &[i64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Copy of the matrix with one row and one column deleted
    ///
    /// # Panics
    ///
    /// Panics if the matrix has no rows or no columns.
    pub fn minor(&self, skip_row: usize, skip_col: usize) -> Self {
        assert!(self.rows > 0 && self.cols > 0, "minor of an empty matrix");
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for r in (0..self.rows).filter(|&r| r != skip_row) {
            for c in (0..self.cols).filter(|&c| c != skip_col) {
                data.push(self.get(r, c));
            }
        }
        Self {
            rows: self.rows - 1,
            cols: self.cols - 1,
            data,
        }
    }

    fn ensure_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(HillError::NotSquareMatrix {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .data
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);
        for r in 0..self.rows {
            write!(f, "[")?;
            for (c, value) in self.row(r).iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", value, width = width)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Exact determinant by cofactor expansion along the first row
pub fn determinant(m: &Matrix) -> Result<i128> {
    m.ensure_square()?;
    cofactor_expansion(m)
}

fn cofactor_expansion(m: &Matrix) -> Result<i128> {
    match m.rows {
        0 => Ok(1),
        1 => Ok(m.get(0, 0) as i128),
        2 => {
            let ad = (m.get(0, 0) as i128).checked_mul(m.get(1, 1) as i128);
            let bc = (m.get(0, 1) as i128).checked_mul(m.get(1, 0) as i128);
            ad.zip(bc)
                .and_then(|(ad, bc)| ad.checked_sub(bc))
                .ok_or(HillError::Overflow)
        }
        n => {
            let mut det: i128 = 0;
            for i in 0..n {
                let element = m.get(0, i);
                if element == 0 {
                    continue;
                }
                let minor_det = cofactor_expansion(&m.minor(0, i))?;
                let term = (element as i128)
                    .checked_mul(minor_det)
                    .ok_or(HillError::Overflow)?;
                det = if i % 2 == 0 {
                    det.checked_add(term)
                } else {
                    det.checked_sub(term)
                }
                .ok_or(HillError::Overflow)?;
            }
            Ok(det)
        }
    }
}

/// Signed minor of the entry at (`row`, `col`) of a square matrix
fn cofactor(m: &Matrix, row: usize, col: usize) -> Result<i128> {
    let minor_det = cofactor_expansion(&m.minor(row, col))?;
    if (row + col) % 2 == 0 {
        Ok(minor_det)
    } else {
        minor_det.checked_neg().ok_or(HillError::Overflow)
    }
}

pub fn is_invertible(m: &Matrix) -> Result<bool> {
    Ok(determinant(m)? != 0)
}

/// Real-valued inverse by Gauss–Jordan elimination with partial pivoting
pub fn invert_real(m: &Matrix) -> Result<Vec<Vec<f64>>> {
    if !is_invertible(m)? {
        return Err(HillError::NotInvertible);
    }
    let n = m.rows;

    // [M | I]
    let mut augmented: Vec<Vec<f64>> = (0..n)
        .map(|r| {
            let mut row: Vec<f64> = m.row(r).iter().map(|&v| v as f64).collect();
            row.extend((0..n).map(|c| if c == r { 1.0 } else { 0.0 }));
            row
        })
        .collect();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| augmented[a][col].abs().total_cmp(&augmented[b][col].abs()))
            .unwrap_or(col);
        augmented.swap(col, pivot_row);

        let pivot = augmented[col][col];
        if pivot.abs() < PIVOT_EPSILON {
            return Err(HillError::NotInvertible);
        }
        for value in augmented[col].iter_mut() {
            *value /= pivot;
        }

        let pivot_values = augmented[col].clone();
        for (r, row) in augmented.iter_mut().enumerate() {
            if r == col {
                continue;
            }
            let factor = row[col];
            if factor == 0.0 {
                continue;
            }
            for (value, p) in row.iter_mut().zip(&pivot_values) {
                *value -= factor * p;
            }
        }
    }

    Ok(augmented.into_iter().map(|row| row[n..].to_vec()).collect())
}

/// Inverse rounded to the nearest integers.
///
/// Only exact for unimodular matrices (determinant ±1). For anything else
/// the caller still has to reduce modulo the alphabet size, see
/// [`modular_inverse`].
pub fn invert(m: &Matrix) -> Result<Matrix> {
    let inverse = invert_real(m)?;
    Ok(round_matrix(&inverse))
}

/// Adjugate matrix (transposed cofactors), equal to `det(M) * M^-1`.
///
/// Computed exactly from integer cofactors. Fails with `Overflow` if an
/// entry does not fit in `i64`.
pub fn adjugate(m: &Matrix) -> Result<Matrix> {
    m.ensure_square()?;
    let mut adj = Matrix::new(m.rows, m.cols);
    for r in 0..m.rows {
        for c in 0..m.cols {
            let value = i64::try_from(cofactor(m, c, r)?).map_err(|_| HillError::Overflow)?;
            adj.set(r, c, value);
        }
    }
    Ok(adj)
}

fn round_matrix(values: &[Vec<f64>]) -> Matrix {
    let n = values.len();
    let mut out = Matrix::new(n, n);
    for (r, row) in values.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out.set(r, c, v.round() as i64);
        }
    }
    out
}

/// Matrix-vector product without modular reduction
pub fn multiply(m: &Matrix, v: &[i64]) -> Result<Vec<i64>> {
    if v.len() != m.cols {
        return Err(HillError::DimensionMismatch {
            expected: m.cols,
            actual: v.len(),
        });
    }
    (0..m.rows)
        .map(|r| {
            m.row(r).iter().zip(v).try_fold(0i64, |acc, (&a, &b)| {
                a.checked_mul(b)
                    .and_then(|p| acc.checked_add(p))
                    .ok_or(HillError::Overflow)
            })
        })
        .collect()
}

/// Reduce every element into `[0, modulus)`. `modulus` must be positive.
pub fn normalize(v: &[i64], modulus: i64) -> Vec<i64> {
    v.iter().map(|&x| x.rem_euclid(modulus)).collect()
}

pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a as i64
}

/// Multiplicative inverse of `a` modulo `m` (extended Euclid)
pub fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    if m <= 0 {
        return None;
    }
    let (mut old_r, mut r) = (a.rem_euclid(m), m);
    let (mut old_s, mut s) = (1i64, 0i64);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(m))
}

/// Inverse of `m` over the integers modulo `modulus`.
///
/// `det(M)^-1 * adj(M)` with every cofactor reduced modulo `modulus`, so
/// the result is exact for any matrix whose determinant fits in `i128`.
pub fn modular_inverse(m: &Matrix, modulus: i64) -> Result<Matrix> {
    let det = determinant(m)?;
    if det == 0 || modulus <= 0 {
        return Err(HillError::NotInvertible);
    }
    let wide_modulus = modulus as i128;
    let det_residue = det.rem_euclid(wide_modulus) as i64;
    let det_inverse = mod_inverse(det_residue, modulus).ok_or(HillError::NotInvertibleModulo {
        determinant: det,
        modulus,
    })? as i128;

    let mut inverse = Matrix::new(m.rows, m.cols);
    for r in 0..m.rows {
        for c in 0..m.cols {
            // adj[r][c] is the cofactor at (c, r)
            let entry = cofactor(m, c, r)?.rem_euclid(wide_modulus);
            inverse.set(r, c, (entry * det_inverse).rem_euclid(wide_modulus) as i64);
        }
    }

    if mul_mod(m, &inverse, modulus) != reduce(&Matrix::identity(m.rows), modulus) {
        return Err(HillError::NotInvertible);
    }
    Ok(inverse)
}

fn reduce(m: &Matrix, modulus: i64) -> Matrix {
    Matrix {
        rows: m.rows,
        cols: m.cols,
        data: normalize(&m.data, modulus),
    }
}

fn mul_mod(a: &Matrix, b: &Matrix, modulus: i64) -> Matrix {
    let mut out = Matrix::new(a.rows, b.cols);
    for r in 0..a.rows {
        for c in 0..b.cols {
            let sum: i128 = (0..a.cols)
                .map(|k| a.get(r, k) as i128 * b.get(k, c) as i128)
                .sum();
            out.set(r, c, sum.rem_euclid(modulus as i128) as i64);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook_key() -> Matrix {
        Matrix::from_rows(vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]]).unwrap()
    }

    #[test]
    fn test_determinant_base_cases() {
        let one = Matrix::from_rows(vec![vec![7]]).unwrap();
        assert_eq!(determinant(&one).unwrap(), 7);

        let two = Matrix::from_rows(vec![vec![3, 8], vec![4, 6]]).unwrap();
        assert_eq!(determinant(&two).unwrap(), 3 * 6 - 8 * 4);
    }

    #[test]
    fn test_determinant_textbook_key() {
        assert_eq!(determinant(&textbook_key()).unwrap(), 441);
    }

    #[test]
    fn test_determinant_4x4() {
        let m = Matrix::from_rows(vec![
            vec![1, 0, 2, -1],
            vec![3, 0, 0, 5],
            vec![2, 1, 4, -3],
            vec![1, 0, 5, 0],
        ])
        .unwrap();
        assert_eq!(determinant(&m).unwrap(), 30);
    }

    #[test]
    fn test_determinant_identity_is_one() {
        for n in 1..=6 {
            assert_eq!(determinant(&Matrix::identity(n)).unwrap(), 1);
        }
    }

    #[test]
    fn test_determinant_zero_row() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![0, 0, 0], vec![4, 5, 6]]).unwrap();
        assert_eq!(determinant(&m).unwrap(), 0);
        assert!(!is_invertible(&m).unwrap());
    }

    #[test]
    fn test_determinant_not_square() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert!(matches!(
            determinant(&m),
            Err(HillError::NotSquareMatrix { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(matches!(
            Matrix::from_rows(vec![vec![1, 2], vec![3]]),
            Err(HillError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_minor() {
        let m = textbook_key();
        let minor = m.minor(0, 1);
        assert_eq!(minor.to_rows(), vec![vec![13, 10], vec![20, 15]]);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        Matrix::identity(2).get(2, 0);
    }

    #[test]
    #[should_panic]
    fn test_minor_of_empty_panics() {
        Matrix::new(0, 0).minor(0, 0);
    }

    #[test]
    fn test_invert_unimodular_is_exact() {
        let m = Matrix::from_rows(vec![vec![2, 3], vec![1, 2]]).unwrap();
        let inv = invert(&m).unwrap();
        assert_eq!(inv.to_rows(), vec![vec![2, -3], vec![-1, 2]]);
        assert_eq!(invert(&inv).unwrap(), m);
    }

    #[test]
    fn test_invert_needs_pivoting() {
        // Zero in the top-left corner forces a row swap
        let m = Matrix::from_rows(vec![vec![0, 1, 0], vec![1, 0, 0], vec![0, 0, 1]]).unwrap();
        assert_eq!(invert(&m).unwrap(), m);
    }

    #[test]
    fn test_invert_real_product_is_identity() {
        let m = textbook_key();
        let inverse = invert_real(&m).unwrap();
        let product: Vec<Vec<f64>> = (0..3)
            .map(|r| {
                (0..3)
                    .map(|c| (0..3).map(|k| m.get(r, k) as f64 * inverse[k][c]).sum())
                    .collect()
            })
            .collect();
        for (r, row) in product.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-9, "({}, {}) = {}", r, c, v);
            }
        }
    }

    #[test]
    fn test_invert_singular() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![2, 4]]).unwrap();
        assert!(matches!(invert(&m), Err(HillError::NotInvertible)));
    }

    #[test]
    fn test_adjugate() {
        let m = Matrix::from_rows(vec![vec![3, 8], vec![4, 6]]).unwrap();
        assert_eq!(adjugate(&m).unwrap().to_rows(), vec![vec![6, -8], vec![-4, 3]]);
    }

    /// 5x5 key over a 4099-symbol alphabet, determinant beyond f64 precision
    fn wide_key_5() -> Matrix {
        Matrix::from_rows(vec![
            vec![3608, 1600, 1914, 2409, 4094],
            vec![37, 696, 3746, 2278, 3332],
            vec![681, 2080, 2582, 1881, 2367],
            vec![243, 575, 884, 3280, 883],
            vec![2383, 3166, 547, 138, 4],
        ])
        .unwrap()
    }

    /// 6x6 key over a 4099-symbol alphabet, determinant beyond i64
    fn wide_key_6() -> Matrix {
        Matrix::from_rows(vec![
            vec![1749, 1718, 428, 3850, 3075, 3255],
            vec![3438, 598, 1626, 2210, 2759, 713],
            vec![2549, 2724, 124, 3359, 966, 1102],
            vec![2018, 827, 89, 490, 3808, 3988],
            vec![1455, 1543, 3665, 1562, 1072, 3434],
            vec![3143, 954, 3234, 3446, 1743, 3],
        ])
        .unwrap()
    }

    #[test]
    fn test_determinant_wide_keys() {
        assert_eq!(determinant(&wide_key_5()).unwrap(), 71_011_535_134_453_209);
        assert_eq!(
            determinant(&wide_key_6()).unwrap(),
            -98_647_885_762_442_861_864
        );
    }

    #[test]
    fn test_adjugate_is_exact_for_large_determinant() {
        let m = wide_key_5();
        let det = determinant(&m).unwrap();
        let adj = adjugate(&m).unwrap();
        for r in 0..5 {
            for c in 0..5 {
                let sum: i128 = (0..5)
                    .map(|k| m.get(r, k) as i128 * adj.get(k, c) as i128)
                    .sum();
                assert_eq!(sum, if r == c { det } else { 0 }, "({}, {})", r, c);
            }
        }
    }

    #[test]
    fn test_modular_inverse_wide_keys() {
        for m in [wide_key_5(), wide_key_6()] {
            let inverse = modular_inverse(&m, 4099).unwrap();
            assert_eq!(
                mul_mod(&m, &inverse, 4099),
                Matrix::identity(m.rows())
            );
            assert_eq!(
                mul_mod(&inverse, &m, 4099),
                Matrix::identity(m.rows())
            );
        }
    }

    #[test]
    fn test_adjugate_one_by_one() {
        let m = Matrix::from_rows(vec![vec![7]]).unwrap();
        assert_eq!(adjugate(&m).unwrap().to_rows(), vec![vec![1]]);
    }

    #[test]
    fn test_multiply() {
        let product = multiply(&textbook_key(), &[0, 2, 19]).unwrap();
        assert_eq!(product, vec![67, 222, 319]);
        assert!(matches!(
            multiply(&textbook_key(), &[1, 2]),
            Err(HillError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_normalize_negative() {
        assert_eq!(normalize(&[-1, -27, 0, 25, 26, 53], 26), vec![25, 25, 0, 25, 0, 1]);
    }

    #[test]
    fn test_gcd_and_mod_inverse() {
        assert_eq!(gcd(441, 26), 1);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(mod_inverse(441, 26), Some(25));
        assert_eq!(mod_inverse(3, 26), Some(9));
        assert_eq!(mod_inverse(-1, 26), Some(25));
        assert_eq!(mod_inverse(13, 26), None);
    }

    #[test]
    fn test_modular_inverse_textbook_key() {
        let inverse = modular_inverse(&textbook_key(), 26).unwrap();
        assert_eq!(
            inverse.to_rows(),
            vec![vec![8, 5, 10], vec![21, 8, 21], vec![21, 12, 8]]
        );
    }

    #[test]
    fn test_modular_inverse_shared_factor() {
        // det = 2, which has no inverse mod 26
        let m = Matrix::from_rows(vec![vec![2, 0], vec![0, 1]]).unwrap();
        assert!(matches!(
            modular_inverse(&m, 26),
            Err(HillError::NotInvertibleModulo { determinant: 2, modulus: 26 })
        ));
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(vec![vec![6, 24], vec![13, 1]]).unwrap();
        assert_eq!(m.to_string(), "[ 6 24]\n[13  1]\n");
    }
}
