//! Dense matrix storage with a constant number of columns.

use std::fmt::Debug;
use std::fmt::Error as FmtError;
use std::fmt::Formatter;
use std::iter::ExactSizeIterator;
use std::ops::Index;
use std::ops::IndexMut;
use std::slice::ChunksExact;
use std::slice::ChunksExactMut;

use typenum::marker_traits::NonZero;
use typenum::marker_traits::Unsigned;

// --- DenseMatrix -------------------------------------------------------------

/// A row-major dense matrix with a constant number of columns.
///
/// Matrices in this crate store one motif position per row and one alphabet
/// symbol per column.
#[derive(Clone)]
pub struct DenseMatrix<T: Default + Copy, C: Unsigned + NonZero> {
    data: Vec<T>,
    rows: usize,
    _columns: std::marker::PhantomData<C>,
}

impl<T: Default + Copy, C: Unsigned + NonZero> DenseMatrix<T, C> {
    /// Create a new matrix with the given number of rows.
    pub fn new(rows: usize) -> Self {
        Self {
            data: vec![T::default(); rows * C::USIZE],
            rows,
            _columns: std::marker::PhantomData,
        }
    }

    /// Create a new dense matrix from an iterable of rows.
    ///
    /// # Panics
    ///
    /// Panics if any of the rows does not have the number of elements
    /// corresponding to the dense matrix columns.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<[T]>,
        <I as IntoIterator>::IntoIter: ExactSizeIterator,
    {
        let it = rows.into_iter();
        let mut dense = Self::new(it.len());

        for (i, row) in it.enumerate() {
            dense[i].copy_from_slice(row.as_ref());
        }

        dense
    }

    /// The number of columns of the matrix.
    #[inline]
    pub const fn columns(&self) -> usize {
        C::USIZE
    }

    /// The number of rows of the matrix.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Iterate over the rows of the matrix.
    #[inline]
    pub fn iter(&self) -> ChunksExact<'_, T> {
        self.data.chunks_exact(C::USIZE)
    }

    /// Returns an iterator that allows modifying each row.
    #[inline]
    pub fn iter_mut(&mut self) -> ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(C::USIZE)
    }

    /// Iterate over the values of a single column.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(move |row| &row[index])
    }
}

impl<T: Default + Copy + Debug, C: Unsigned + NonZero> Debug for DenseMatrix<T, C> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Default + Copy + PartialEq, C: Unsigned + NonZero> PartialEq for DenseMatrix<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.data == other.data
    }
}

impl<T: Default + Copy + Eq, C: Unsigned + NonZero> Eq for DenseMatrix<T, C> {}

impl<T: Default + Copy, C: Unsigned + NonZero> Index<usize> for DenseMatrix<T, C> {
    type Output = [T];
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        let row = C::USIZE * index;
        &self.data[row..row + C::USIZE]
    }
}

impl<T: Default + Copy, C: Unsigned + NonZero> IndexMut<usize> for DenseMatrix<T, C> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let row = C::USIZE * index;
        &mut self.data[row..row + C::USIZE]
    }
}

impl<'a, T: Default + Copy, C: Unsigned + NonZero> IntoIterator for &'a DenseMatrix<T, C> {
    type Item = &'a [T];
    type IntoIter = ChunksExact<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Default + Copy, C: Unsigned + NonZero> IntoIterator for &'a mut DenseMatrix<T, C> {
    type Item = &'a mut [T];
    type IntoIter = ChunksExactMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
