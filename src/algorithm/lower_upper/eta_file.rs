use crate::data::number_types::traits::Field;

/// Elementary row operation, or "file".
///
/// Represents `E = I + sum_i v_i e_i e_p'` for the pivot row `p`: multiples of the pivot row are
/// added to the rows `i`. Eliminations during the decomposition are stored in this form. The
/// transpose, `E' = I + sum_i v_i e_p e_i'`, adds multiples of the rows `i` to the pivot row, which
/// is the form of the eliminations done by a Forrest-Tomlin update.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct EtaFile<F> {
    values: Vec<(usize, F)>,
    pivot: usize,
}

impl<F: Field> EtaFile<F> {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `values`: Row indices and multipliers, the pivot index should not be among them.
    /// * `pivot`: Row that is multiplied.
    pub fn new(values: Vec<(usize, F)>, pivot: usize) -> Self {
        debug_assert!(values.iter().all(|&(i, _)| i != pivot));
        debug_assert!(values.iter().all(|(_, value)| !value.is_zero()));

        Self { values, pivot }
    }

    /// Multiply a dense vector with `E` from the left.
    ///
    /// Adds multiples of the pivot value to the other indices.
    pub fn scatter(&self, work: &mut [F]) {
        if !work[self.pivot].is_zero() {
            let pivot_value = work[self.pivot].clone();
            for (i, value) in &self.values {
                work[*i] += &(pivot_value.clone() * value);
            }
        }
    }

    /// Multiply a dense vector with `E'` from the left.
    ///
    /// Adds multiples of the other indices to the pivot value.
    pub fn gather(&self, work: &mut [F]) {
        let mut total = F::zero();
        for (i, value) in &self.values {
            if !work[*i].is_zero() {
                total += &(work[*i].clone() * value);
            }
        }
        work[self.pivot] += &total;
    }

    /// Number of stored multipliers.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}
