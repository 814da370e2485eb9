//! IDF command: scale multi-window maxima and write the tables as JSON.

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, warn};

use nimbus_idf::{IdfMethod, IdfResult, idf_analysis};

use crate::cli::IdfArgs;
use crate::convert;
use crate::input::{self, Inputs};

/// JSON result of the `idf` command.
#[derive(Debug, Serialize)]
pub struct IdfReport {
    pub success: bool,
    pub method: IdfMethod,
    pub windows: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<IdfResult>,
}

/// Run the IDF pipeline.
pub fn run(args: IdfArgs) -> Result<()> {
    let _cmd = info_span!("idf").entered();
    // 1. Load project TOML
    let mut config = input::load_config(&args.config)?;
    if let Some(m) = args.method {
        config.idf.method = m;
    }
    let idf_config = convert::build_idf_config(&config.idf)?;

    // 2. Read series
    let Inputs { observed, modelled } = input::read_inputs(&config)?;

    // 3. Scale
    info!(method = %idf_config.method(), windows = ?idf_config.windows(), "scaling");
    let report = match idf_analysis(observed.as_ref(), &modelled, &idf_config) {
        Ok(result) => IdfReport {
            success: true,
            method: idf_config.method(),
            windows: idf_config.windows().to_vec(),
            error: None,
            result: Some(result),
        },
        Err(e) => {
            warn!(error = %e, "no IDF table produced");
            IdfReport {
                success: false,
                method: idf_config.method(),
                windows: idf_config.windows().to_vec(),
                error: Some(e.to_string()),
                result: None,
            }
        }
    };

    // 4. Write result
    input::write_json(args.output.as_deref(), &report)
}
