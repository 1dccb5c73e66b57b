// Pure numeric core: every function here is a total transformation of
// its explicit inputs, with no I/O and no shared state.
pub mod coefficient;
pub mod distribution;
pub mod meter;
pub mod power;
pub mod resample;
pub mod solar;
