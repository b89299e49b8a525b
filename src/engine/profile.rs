//! Ceteris-paribus profiles

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::errors::{EngineError, EngineResult};
use super::support::{observation_point, observed_value, Grid};
use crate::data::Cell;
use crate::explainer::Explainer;
use crate::observation::Observation;

/// The observation's own position on the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub value: Cell,
    pub prediction: f64,
}

/// Predictions for one observation as a single variable is swept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeterisParibusProfile {
    pub variable: String,
    pub numerical: bool,
    pub observation: ProfilePoint,
    pub x: Vec<Cell>,
    pub y: Vec<f64>,
}

pub fn ceteris_paribus(
    explainer: &Explainer,
    observation: &Observation<'_>,
    variable: &str,
    config: &EngineConfig,
) -> EngineResult<CeterisParibusProfile> {
    let column = explainer
        .data()
        .column(variable)
        .ok_or_else(|| EngineError::UnknownVariable(variable.to_string()))?;
    let own = observed_value(observation, variable)?.clone();
    let grid = Grid::for_column(column, config.grid_points)?;

    let mut x = grid.cells();
    if !x.contains(&own) {
        let position = match own.as_number() {
            Some(value) => x
                .iter()
                .position(|c| c.as_number().is_some_and(|g| g > value))
                .unwrap_or(x.len()),
            None => x.len(),
        };
        x.insert(position, own.clone());
    }

    let point = observation_point(explainer, observation)?;
    let sweep = point
        .repeat_row(0, x.len())?
        .with_column_replaced(variable, x.clone())?;
    let y = explainer.predict(&sweep)?;
    let prediction = explainer.predict(&point)?[0];

    Ok(CeterisParibusProfile {
        variable: variable.to_string(),
        numerical: grid.is_numeric(),
        observation: ProfilePoint {
            value: own,
            prediction,
        },
        x,
        y,
    })
}
