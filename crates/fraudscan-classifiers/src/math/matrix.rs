use std::error::Error;
use std::fmt;
use std::ops::{Index, Range};

use crate::math::vector::Array1;

#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from row vectors. The first row fixes the column count;
    /// any later row of a different length is reported as ragged.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, ShapeError>
    where
        T: Clone,
    {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(ShapeError::RaggedRow {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |row| self.row_slice(row))
    }

    pub fn column(&self, col: usize) -> Array1<T>
    where
        T: Clone,
    {
        assert!(col < self.cols, "column index out of bounds");
        self.rows().map(|row| row[col].clone()).collect()
    }

    /// Copy a contiguous block of rows.
    pub fn slice_rows(&self, range: Range<usize>) -> Array2<T>
    where
        T: Clone,
    {
        assert!(
            range.start <= range.end && range.end <= self.rows,
            "row slice out of bounds"
        );
        let start = self.offset(range.start, 0);
        let end = self.offset(range.end, 0);
        Array2 {
            data: self.data[start..end].to_vec(),
            rows: range.end - range.start,
            cols: self.cols,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A flat buffer does not hold `rows * cols` values.
    BufferLength { rows: usize, cols: usize, len: usize },
    /// A row's length differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::BufferLength { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            ShapeError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} values, expected {}",
                row, found, expected
            ),
        }
    }
}

impl Error for ShapeError {}
