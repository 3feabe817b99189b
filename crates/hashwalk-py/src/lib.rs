use hashwalk_core::{GeneratorKind, RenderConfig, RenderRequest, Renderer};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Minimal PyO3 module exposing hashwalk-core to Python.
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Render one field and return its packed 0x00RRGGBB pixels, row-major.
#[pyfunction]
#[pyo3(signature = (width, height, generator = "mum", seed = 1000, steps_per_cell = 40))]
fn render_field(
    width: usize,
    height: usize,
    generator: &str,
    seed: u64,
    steps_per_cell: u32,
) -> PyResult<Vec<u32>> {
    let generator: GeneratorKind = generator.parse().map_err(value_error)?;
    let config = RenderConfig {
        width,
        height,
        steps_per_cell,
        generator,
        seed,
    };
    let mut renderer = Renderer::from_config(&config).map_err(value_error)?;
    let rendered = renderer
        .render(RenderRequest::new(width, height))
        .map_err(value_error)?;
    Ok(rendered.pixels.pixels)
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_function(wrap_pyfunction!(render_field, m)?)?;
    Ok(())
}
