//!
//! Python side of the bindings.
//!
//! Python objects are converted into [`Value`]s, handed to [`binding`], and the results
//! come back as a tuple. Malformed calls raise `TypeError` or `ValueError`; driver
//! failures are returned, never raised. The `ni4882` extension module itself is built
//! with the `python` feature.
//!

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyBytes, PyDict, PyFrozenSet, PyList, PyLong, PySet, PyString, PyTuple};

use crate::{
    binding::{self, ArgError},
    driver::Driver,
    value::{Key, Value},
    Gpib,
};

#[cfg(feature = "python")]
mod module;

impl From<ArgError> for PyErr {
    fn from(e: ArgError) -> Self {
        match e {
            ArgError::Arity { .. } | ArgError::Type { .. } => PyTypeError::new_err(e.to_string()),
            _ => PyValueError::new_err(e.to_string()),
        }
    }
}

fn to_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Nil);
    }
    // bool is a subclass of int, check it first
    if let Ok(b) = obj.downcast::<PyBool>() {
        return Ok(Value::Bool(b.is_true()));
    }
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(Value::Str(s.to_cow()?.into_owned()));
    }
    if let Ok(b) = obj.downcast::<PyBytes>() {
        return Ok(Value::Bytes(bytes::Bytes::copy_from_slice(b.as_bytes())));
    }
    if let Ok(l) = obj.downcast::<PyList>() {
        return l.iter().map(|x| to_value(&x)).collect::<PyResult<_>>().map(Value::List);
    }
    if let Ok(t) = obj.downcast::<PyTuple>() {
        return t.iter().map(|x| to_value(&x)).collect::<PyResult<_>>().map(Value::List);
    }
    if let Ok(s) = obj.downcast::<PySet>() {
        return s.iter().map(|x| to_value(&x)).collect::<PyResult<_>>().map(Value::List);
    }
    if let Ok(s) = obj.downcast::<PyFrozenSet>() {
        return s.iter().map(|x| to_value(&x)).collect::<PyResult<_>>().map(Value::List);
    }
    if obj.is_instance_of::<PyLong>() {
        return Ok(Value::Int(obj.extract()?));
    }
    let name = obj.get_type().name()?.to_string();
    Ok(Value::Foreign(name))
}

fn to_object(py: Python<'_>, value: Value) -> PyResult<PyObject> {
    Ok(match value {
        Value::Nil => py.None(),
        Value::Bool(b) => b.into_py(py),
        Value::Int(i) => i.into_py(py),
        Value::Str(s) => s.into_py(py),
        Value::Bytes(b) => PyBytes::new_bound(py, &b).into_py(py),
        Value::List(items) => {
            let items = items
                .into_iter()
                .map(|v| to_object(py, v))
                .collect::<PyResult<Vec<_>>>()?;
            PyList::new_bound(py, items).into_py(py)
        }
        Value::Table(table) => {
            let dict = PyDict::new_bound(py);
            for (k, v) in table {
                let v = to_object(py, v)?;
                match k {
                    Key::Index(i) => dict.set_item(i, v)?,
                    Key::Name(n) => dict.set_item(n, v)?,
                }
            }
            dict.into_py(py)
        }
        Value::Foreign(name) => {
            return Err(PyTypeError::new_err(format!("cannot return a {} value", name)))
        }
    })
}

/// Call an exposed function with Python arguments, returning its results as a tuple
#[cfg_attr(not(feature = "python"), allow(dead_code))]
fn invoke<D: Driver + Sync>(
    py: Python<'_>,
    gpib: &Gpib<D>,
    name: &str,
    args: &Bound<'_, PyTuple>,
) -> PyResult<PyObject> {
    let args = args
        .iter()
        .map(|x| to_value(&x))
        .collect::<PyResult<Vec<_>>>()?;
    // the driver call blocks; let other Python threads run meanwhile
    let results = py.allow_threads(|| binding::call(gpib, name, &args))?;
    let results = results
        .into_iter()
        .map(|v| to_object(py, v))
        .collect::<PyResult<Vec<_>>>()?;
    Ok(PyTuple::new_bound(py, results).into_py(py))
}

#[cfg(test)]
mod tests {
    use pyo3::types::{PyDict, PyFrozenSet, PySet};

    use super::*;
    use crate::{driver::Registers, flags::Status, Ud};

    /// Answers every call with the same registers
    struct Fixed(Registers);

    impl Fixed {
        fn ok() -> Self {
            Self(Registers::new(Status::CMPL | Status::END, 0, 0))
        }

        fn failing(code: i32) -> Self {
            Self(Registers::new(Status::ERR | Status::CMPL, code, 0))
        }
    }

    impl Driver for Fixed {
        fn ibdev(
            &self,
            _board: i32,
            _pad: i32,
            _sad: i32,
            _tmo: i32,
            _eot: i32,
            _eos: i32,
        ) -> (Ud, Registers) {
            let ud = if self.0.failed() { -1 } else { 7 };
            (Ud::from_raw(ud), self.0)
        }
        fn ibclr(&self, _ud: Ud) -> Registers {
            self.0
        }
        fn ibonl(&self, _ud: Ud, _online: bool) -> Registers {
            self.0
        }
        fn ibask(&self, _ud: Ud, _option: i32) -> (i32, Registers) {
            (42, self.0)
        }
        fn ibconfig(&self, _ud: Ud, _option: i32, _value: i32) -> Registers {
            self.0
        }
        fn ibrd(&self, _ud: Ud, buf: &mut [u8]) -> Registers {
            if self.0.failed() {
                return self.0;
            }
            let n = buf.len().min(2);
            buf[..n].copy_from_slice(&b"AB"[..n]);
            Registers { count: n, ..self.0 }
        }
        fn ibwrt(&self, _ud: Ud, buf: &[u8]) -> Registers {
            Registers {
                count: buf.len(),
                ..self.0
            }
        }
        fn ibrsp(&self, _ud: Ud) -> (u8, Registers) {
            (0x40, self.0)
        }
        fn ibtrg(&self, _ud: Ud) -> Registers {
            self.0
        }
        fn ibwait(&self, _ud: Ud, _mask: Status) -> Registers {
            self.0
        }
    }

    fn obj(py: Python<'_>, v: impl IntoPy<PyObject>) -> Bound<'_, PyAny> {
        v.into_py(py).into_bound(py)
    }

    fn call<'py>(
        py: Python<'py>,
        driver: Fixed,
        name: &str,
        args: Vec<PyObject>,
    ) -> PyResult<Bound<'py, PyTuple>> {
        let args = PyTuple::new_bound(py, args);
        let r = invoke(py, &Gpib::new(driver), name, &args)?;
        Ok(r.into_bound(py).downcast_into::<PyTuple>()?)
    }

    #[test]
    fn bool_is_not_an_integer() -> PyResult<()> {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            assert_eq!(to_value(&obj(py, true))?, Value::Bool(true));
            assert_eq!(to_value(&obj(py, 1i64))?, Value::Int(1));
            assert_eq!(to_value(&py.None().into_bound(py))?, Value::Nil);
            assert_eq!(to_value(&obj(py, 1.5f64))?, Value::Foreign("float".into()));
            Ok(())
        })
    }

    #[test]
    fn collections_become_lists() -> PyResult<()> {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let expected = Value::List(vec![Value::Str("TIMO".into())]);
            let set = PySet::new_bound(py, &["TIMO"])?;
            assert_eq!(to_value(set.as_any())?, expected);
            let frozen = PyFrozenSet::new_bound(py, &["TIMO"])?;
            assert_eq!(to_value(frozen.as_any())?, expected);
            let tuple = PyTuple::new_bound(py, ["TIMO"]);
            assert_eq!(to_value(tuple.as_any())?, expected);
            Ok(())
        })
    }

    #[test]
    fn indexed_tables_start_at_one() -> PyResult<()> {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let table = Value::indexed([Value::Str("A".into()), Value::Str("B".into())]);
            let dict = to_object(py, table)?.into_bound(py).downcast_into::<PyDict>()?;
            assert_eq!(dict.len(), 2);
            assert!(dict.get_item(0)?.is_none());
            let first = dict.get_item(1)?.expect("key 1");
            assert_eq!(first.extract::<String>()?, "A");
            Ok(())
        })
    }

    #[test]
    fn malformed_calls_raise() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let arity = call(py, Fixed::ok(), "ibclr", vec![]).unwrap_err();
            assert!(arity.is_instance_of::<PyTypeError>(py));

            let typed = call(py, Fixed::ok(), "ibclr", vec!["x".into_py(py)]).unwrap_err();
            assert!(typed.is_instance_of::<PyTypeError>(py));

            let args = vec![1i64.into_py(py), "IbcNOPE".into_py(py)];
            let option = call(py, Fixed::ok(), "ibask", args).unwrap_err();
            assert!(option.is_instance_of::<PyValueError>(py));

            let args = vec![1i64.into_py(py), 2i64.into_py(py), "hexTable".into_py(py)];
            let mode = call(py, Fixed::ok(), "ibrd", args).unwrap_err();
            assert!(mode.is_instance_of::<PyValueError>(py));

            let args = vec![1i64.into_py(py), i64::MAX.into_py(py)];
            let huge = call(py, Fixed::ok(), "ibrd", args).unwrap_err();
            assert!(huge.is_instance_of::<PyValueError>(py));
        })
    }

    #[test]
    fn results_are_tuples() -> PyResult<()> {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let args = [0i64, 22, 0, 13, 1, 0].into_iter().map(|x| x.into_py(py)).collect();
            let r = call(py, Fixed::ok(), "ibdev", args)?;
            assert_eq!(r.len(), 3);
            assert_eq!(r.get_item(0)?.extract::<i64>()?, 7);
            let status = r.get_item(1)?.downcast_into::<PyDict>()?;
            assert_eq!(status.len(), 14);
            assert!(status.get_item("CMPL")?.expect("CMPL").extract::<bool>()?);
            assert!(!status.get_item("ERR")?.expect("ERR").extract::<bool>()?);
            assert!(r.get_item(2)?.is_none());

            let r = call(py, Fixed::ok(), "ibclr", vec![7i64.into_py(py)])?;
            assert_eq!(r.len(), 2);
            assert!(r.get_item(1)?.is_none());

            let args = vec![7i64.into_py(py), 10i64.into_py(py)];
            let r = call(py, Fixed::ok(), "ibrd", args)?;
            assert_eq!(r.get_item(0)?.downcast_into::<PyBytes>()?.as_bytes(), b"AB");

            let args = vec![7i64.into_py(py), 10i64.into_py(py), "binTable".into_py(py)];
            let r = call(py, Fixed::ok(), "ibrd", args)?;
            let bins = r.get_item(0)?.downcast_into::<PyDict>()?;
            assert_eq!(bins.get_item(1)?.expect("key 1").extract::<i64>()?, 65);
            assert_eq!(bins.get_item(2)?.expect("key 2").extract::<i64>()?, 66);

            let args = vec![7i64.into_py(py), vec!["RQS", "END"].into_py(py)];
            let r = call(py, Fixed::ok(), "ibwait", args)?;
            assert_eq!(r.len(), 2);
            Ok(())
        })
    }

    #[test]
    fn driver_failures_are_returned() -> PyResult<()> {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let args = vec![7i64.into_py(py), 10i64.into_py(py)];
            let r = call(py, Fixed::failing(6), "ibrd", args)?;
            assert_eq!(r.len(), 3);
            assert!(r.get_item(0)?.is_none());
            let status = r.get_item(1)?.downcast_into::<PyDict>()?;
            assert!(status.get_item("ERR")?.expect("ERR").extract::<bool>()?);
            assert_eq!(r.get_item(2)?.extract::<String>()?, "EABO: I/O operation aborted");
            Ok(())
        })
    }
}
