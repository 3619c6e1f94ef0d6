use pyo3::prelude::*;
use pyo3::types::PyTuple;

use crate::{native::Ni4882, Gpib, VERSION};

macro_rules! py_functions {
    ($($name:ident),* $(,)?) => {
        $(
            #[pyfunction]
            #[pyo3(signature = (*args))]
            fn $name(py: Python<'_>, args: &Bound<'_, PyTuple>) -> PyResult<PyObject> {
                super::invoke(py, &Gpib::new(Ni4882), stringify!($name), args)
            }
        )*

        fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
            $(m.add_function(wrap_pyfunction!($name, m)?)?;)*
            Ok(())
        }
    };
}

py_functions! {
    ibclr,
    ibdev,
    ibrd,
    ibwrt,
    ibonl,
    ibask,
    ibconfig,
    ibrsp,
    ibtrg,
    ibwait,
}

#[pymodule]
fn ni4882(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register(m)?;
    m.add("_VERSION", VERSION)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
