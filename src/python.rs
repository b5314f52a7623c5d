//! PyO3 bindings for the FastAPI backend.
//!
//! Exposes the journey pipeline as `datagraph_journey.process_data_graph_response`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use serde_json::Value;

use crate::discovery::tables::RowRecord;
use crate::pipeline::context::QueryContext;
use crate::pipeline::journey::process_response_str;

/// Process a raw Data Graph response body.
///
/// # Arguments
/// * `response_json` - The raw response body from the Data Graph endpoint
/// * `graph_name` - Optional graph name for logging
///
/// # Returns
/// Dict with `query_id`, `tables`, `timeline`, `profile`, `filter_options`.
///
/// Raises `ValueError` only when `response_json` is not valid JSON.
#[pyfunction]
#[pyo3(signature = (response_json, graph_name=None))]
fn process_data_graph_response(
    py: Python<'_>,
    response_json: String,
    graph_name: Option<String>,
) -> PyResult<Py<PyAny>> {
    crate::init_logger();

    let ctx = QueryContext::new(graph_name.as_deref());
    let result = process_response_str(&ctx, &response_json)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let out = PyDict::new(py);
    out.set_item("query_id", &ctx.query_id)?;

    let tables = PyDict::new(py);
    for (name, table) in &result.tables {
        let table_dict = PyDict::new(py);
        table_dict.set_item(
            "columns",
            table.columns().into_iter().collect::<Vec<String>>(),
        )?;
        let rows = PyList::empty(py);
        for row in &table.rows {
            rows.append(row_to_py(py, row)?)?;
        }
        table_dict.set_item("rows", rows)?;
        tables.set_item(name, table_dict)?;
    }
    out.set_item("tables", tables)?;

    let timeline = PyList::empty(py);
    for event in &result.timeline {
        let event_dict = PyDict::new(py);
        event_dict.set_item("id", &event.id)?;
        event_dict.set_item("timestamp", event.timestamp.to_rfc3339())?;
        event_dict.set_item("type", &event.event_type)?;
        event_dict.set_item("table_name", &event.table_name)?;
        event_dict.set_item("summary", &event.summary)?;
        event_dict.set_item("details", row_to_py(py, &event.details)?)?;
        event_dict.set_item("session_id", event.session_id.as_deref())?;
        event_dict.set_item("device_type", event.device_type.as_deref())?;
        event_dict.set_item("cart_id", event.cart_id.as_deref())?;
        timeline.append(event_dict)?;
    }
    out.set_item("timeline", timeline)?;

    let profile = PyDict::new(py);
    profile.set_item("name", &result.profile.name)?;
    profile.set_item("date_of_birth", result.profile.date_of_birth.as_deref())?;
    profile.set_item("identifiers", result.profile.identifiers.clone())?;
    profile.set_item("insights", result.profile.insights.clone())?;
    profile.set_item("raw_fields", row_to_py(py, &result.profile.raw_fields)?)?;
    out.set_item("profile", profile)?;

    let options = PyDict::new(py);
    options.set_item("event_types", result.filter_options.event_types.clone())?;
    options.set_item("sessions", result.filter_options.sessions.clone())?;
    options.set_item("devices", result.filter_options.devices.clone())?;
    options.set_item("carts", result.filter_options.carts.clone())?;
    out.set_item("filter_options", options)?;

    Ok(out.into())
}

fn row_to_py<'py>(py: Python<'py>, row: &RowRecord) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    for (key, value) in row {
        dict.set_item(key, scalar_to_py(py, value))?;
    }
    Ok(dict)
}

fn scalar_to_py(py: Python<'_>, value: &Value) -> PyObject {
    match value {
        Value::Null => py.None(),
        Value::Bool(b) => b.into_py(py),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into_py(py)
            } else if let Some(f) = n.as_f64() {
                f.into_py(py)
            } else {
                n.to_string().into_py(py)
            }
        }
        Value::String(s) => s.into_py(py),
        other => other.to_string().into_py(py),
    }
}

/// Python module definition
#[pymodule]
fn datagraph_journey(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(process_data_graph_response, m)?)?;
    Ok(())
}
