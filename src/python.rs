//! PyO3 bindings for Python interoperability.
//!
//! Exposes the three host-facing entry points (spec §6) to Python as a
//! native extension module. Errors never panic across the FFI boundary -
//! they surface as `ValueError`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::dispatch::validate_share;
use crate::graph::{generate_graph, generate_graph_v2};

/// Convert a Rust `Result` to a `PyResult`.
fn to_py_result<T>(result: crate::Result<T>) -> PyResult<T> {
    result.map_err(|e| PyValueError::new_err(format!("{}", e)))
}

/// `generateGraph(hashHex, n) -> list[list[bool]]` - legacy bit-stream
/// variant (spec §9).
#[pyfunction(name = "generate_graph")]
fn generate_graph_py(hash_hex: &str, n: usize) -> PyResult<Vec<Vec<bool>>> {
    let graph = generate_graph(hash_hex, n);
    Ok(matrix_rows(&graph))
}

/// `generateGraphV2(hashHex, n, percentageX10) -> list[list[bool]]`.
#[pyfunction(name = "generate_graph_v2")]
fn generate_graph_v2_py(hash_hex: &str, n: usize, percentage_x10: u32) -> PyResult<Vec<Vec<bool>>> {
    let graph = generate_graph_v2(hash_hex, n, percentage_x10);
    Ok(matrix_rows(&graph))
}

fn matrix_rows(graph: &crate::graph::Graph) -> Vec<Vec<bool>> {
    (0..graph.len())
        .map(|i| (0..graph.len()).map(|j| graph.has_edge(i, j)).collect())
        .collect()
}

/// `validateShare(blockData, nonce, path, jobTarget, blockTarget, blockHex) ->
/// dict` - synchronous validation (the async future from spec §4.H is a
/// tokio-side concern; Python callers get the same verdict without needing
/// an event loop).
#[pyfunction(name = "validate_share")]
#[allow(clippy::too_many_arguments)]
fn validate_share_py(
    py: Python,
    block_data_hex: &str,
    nonce_hex: &str,
    path_hex: &str,
    job_target_hex: &str,
    block_target_hex: &str,
    block_hex: &str,
) -> PyResult<PyObject> {
    let verdict = validate_share(
        block_data_hex,
        nonce_hex,
        path_hex,
        job_target_hex,
        block_target_hex,
        block_hex,
    );
    let json = to_py_result(
        serde_json::to_string(&verdict)
            .map_err(|e| crate::errors::ValidatorError::Internal(e.to_string())),
    )?;

    let json_module = PyModule::import(py, "json")?;
    json_module.call_method1("loads", (json,)).map(|v| v.into())
}

/// Hamiltonian-cycle proof-of-work share validator, exposed to Python.
#[pymodule]
fn shaipot_validator(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_graph_py, m)?)?;
    m.add_function(wrap_pyfunction!(generate_graph_v2_py, m)?)?;
    m.add_function(wrap_pyfunction!(validate_share_py, m)?)?;

    m.add("__version__", crate::VERSION)?;
    m.add("CODEC_VERSION", crate::CODEC_VERSION)?;
    m.add("MAX_GRID_SIZE", crate::MAX_GRID_SIZE)?;

    Ok(())
}
