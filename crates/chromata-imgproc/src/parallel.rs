use ndarray::{ArrayBase, ArrayView1, ArrayViewMut1, Axis, Data, DataMut, Dimension, Zip};

/// Apply a function to each pair of lanes along `axis` in parallel.
///
/// A lane is the 1-D view running along `axis` at a fixed position of every
/// other axis, so for a channel axis it holds the components of one pixel.
/// `src` and `dst` may differ in extent along `axis` only.
pub fn par_iter_lanes<T1, T2, S1, S2, D>(
    src: &ArrayBase<S1, D>,
    dst: &mut ArrayBase<S2, D>,
    axis: usize,
    f: impl Fn(ArrayView1<T1>, ArrayViewMut1<T2>) + Send + Sync,
) where
    T1: Sync,
    T2: Send + Sync,
    S1: Data<Elem = T1>,
    S2: DataMut<Elem = T2>,
    D: Dimension,
{
    Zip::from(dst.lanes_mut(Axis(axis)))
        .and(src.lanes(Axis(axis)))
        .par_for_each(|dst_lane, src_lane| f(src_lane, dst_lane));
}

/// Reduce each lane along `axis` into one element of `dst` in parallel.
///
/// `dst` has the shape of `src` with `axis` removed.
pub fn par_reduce_lanes<T1, T2, S1, S2, D>(
    src: &ArrayBase<S1, D>,
    dst: &mut ArrayBase<S2, D::Smaller>,
    axis: usize,
    f: impl Fn(ArrayView1<T1>, &mut T2) + Send + Sync,
) where
    T1: Sync,
    T2: Send + Sync,
    S1: Data<Elem = T1>,
    S2: DataMut<Elem = T2>,
    D: Dimension,
{
    Zip::from(dst)
        .and(src.lanes(Axis(axis)))
        .par_for_each(|dst_val, src_lane| f(src_lane, dst_val));
}
