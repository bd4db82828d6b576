use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

use crate::features::FeatureMatrix;

/// Stack equally wide feature rows into a `[rows, width]` float tensor
pub fn stack_rows<B: Backend, R: AsRef<[f32]>>(
    rows: &[R],
    width: usize,
    device: &B::Device,
) -> Tensor<B, 2> {
    let values = rows
        .iter()
        .flat_map(|row| row.as_ref().iter().map(|value| value.elem()))
        .collect();

    Tensor::from_data(Data::new(values, Shape::new([rows.len(), width])), device)
}

/// Convert a dense feature matrix into a `[rows, cols]` float tensor
pub fn from_matrix<B: Backend>(matrix: &FeatureMatrix, device: &B::Device) -> Tensor<B, 2> {
    let rows: Vec<&[f32]> = matrix.iter_rows().collect();

    stack_rows(&rows, matrix.cols(), device)
}

/// Convert class ids into a 1D integer tensor
pub fn class_ids<B: Backend>(ids: &[usize], device: &B::Device) -> Tensor<B, 1, Int> {
    let values = ids.iter().map(|id| (*id as i64).elem()).collect();

    Tensor::from_data(Data::new(values, Shape::new([ids.len()])), device)
}

/// Read a 2D float tensor back into one `Vec` per row
pub fn to_rows<B: Backend>(tensor: Tensor<B, 2>) -> Vec<Vec<f32>> {
    let [_, cols] = tensor.dims();
    let values = tensor.into_data().convert::<f32>().value;

    values.chunks(cols.max(1)).map(<[f32]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use burn::backend::{ndarray::NdArrayDevice, NdArray};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_matrix_round_trip() {
        let device = NdArrayDevice::Cpu;
        let mut matrix = FeatureMatrix::zeros(2, 3);
        matrix.row_mut(0).copy_from_slice(&[0.5, 0.0, 0.25]);
        matrix.row_mut(1).copy_from_slice(&[0.0, 1.0, 0.0]);

        let tensor = from_matrix::<NdArray>(&matrix, &device);

        assert_eq!(tensor.dims(), [2, 3]);
        assert_eq!(to_rows(tensor), vec![vec![0.5, 0.0, 0.25], vec![0.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_class_ids() {
        let device = NdArrayDevice::Cpu;
        let tensor = class_ids::<NdArray>(&[2, 0, 1], &device);

        assert_eq!(tensor.into_data().convert::<i64>().value, vec![2, 0, 1]);
    }
}
