use crate::employee::Employee;
use polars::prelude::PlSmallStr;
use polars::prelude::*;

/// One validated input row: a single (employee, activity) effort weight.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceRow {
    pub employee_id: String,
    pub name: String,
    pub section: String,
    pub cost_center: Option<String>,
    pub activity: String,
    pub weight: f64,
}

/// The full preference table, backed by a DataFrame with one row per
/// (employee, activity) pair carrying non-zero historical weight.
#[derive(Debug)]
pub struct Roster {
    df: DataFrame,
}

impl Roster {
    fn default_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("employee_id".into(), DataType::String),
            Field::new("name".into(), DataType::String),
            Field::new("section".into(), DataType::String),
            Field::new("cost_center".into(), DataType::String),
            Field::new("activity".into(), DataType::String),
            Field::new("weight".into(), DataType::Float64),
        ])
    }

    pub fn new() -> Self {
        let schema = Self::default_schema();
        Self {
            df: DataFrame::empty_with_schema(&schema),
        }
    }

    pub fn from_rows(rows: Vec<PreferenceRow>) -> PolarsResult<Self> {
        let mut employee_ids = Vec::with_capacity(rows.len());
        let mut names = Vec::with_capacity(rows.len());
        let mut sections = Vec::with_capacity(rows.len());
        let mut cost_centers: Vec<Option<String>> = Vec::with_capacity(rows.len());
        let mut activities = Vec::with_capacity(rows.len());
        let mut weights = Vec::with_capacity(rows.len());

        for row in rows {
            employee_ids.push(row.employee_id);
            names.push(row.name);
            sections.push(row.section);
            cost_centers.push(row.cost_center);
            activities.push(row.activity);
            weights.push(row.weight);
        }

        let columns: Vec<Column> = vec![
            Series::new(PlSmallStr::from_static("employee_id"), employee_ids).into_column(),
            Series::new(PlSmallStr::from_static("name"), names).into_column(),
            Series::new(PlSmallStr::from_static("section"), sections).into_column(),
            Series::new(PlSmallStr::from_static("cost_center"), cost_centers).into_column(),
            Series::new(PlSmallStr::from_static("activity"), activities).into_column(),
            Series::new(PlSmallStr::from_static("weight"), weights).into_column(),
        ];

        Ok(Self {
            df: DataFrame::new(columns)?,
        })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Section names in first-appearance order of the input.
    pub fn section_names(&self) -> PolarsResult<Vec<String>> {
        let sections = self.df.column("section")?.str()?;
        let mut names: Vec<String> = Vec::new();
        for value in sections.into_iter().flatten() {
            if !names.iter().any(|existing| existing == value) {
                names.push(value.to_string());
            }
        }
        Ok(names)
    }

    /// Materializes one section's employees and activity catalog. Employees
    /// keep input order; the activity catalog is discovered from the input in
    /// first-appearance order. A later duplicate (employee, activity) row
    /// overwrites the earlier weight.
    pub fn section(&self, name: &str) -> PolarsResult<SectionRoster> {
        let sections = self.df.column("section")?.str()?;
        let employee_ids = self.df.column("employee_id")?.str()?;
        let names = self.df.column("name")?.str()?;
        let cost_centers = self.df.column("cost_center")?.str()?;
        let activities = self.df.column("activity")?.str()?;
        let weights = self.df.column("weight")?.f64()?;

        let mut employees: Vec<Employee> = Vec::new();
        let mut catalog: Vec<String> = Vec::new();

        for idx in 0..self.df.height() {
            if sections.get(idx) != Some(name) {
                continue;
            }
            let employee_id = employee_ids.get(idx).ok_or_else(|| {
                PolarsError::ComputeError("preference row missing employee_id".into())
            })?;
            let activity = activities.get(idx).ok_or_else(|| {
                PolarsError::ComputeError("preference row missing activity".into())
            })?;
            let weight = weights.get(idx).unwrap_or(0.0);

            if !catalog.iter().any(|existing| existing == activity) {
                catalog.push(activity.to_string());
            }

            let position = employees.iter().position(|emp| emp.id == employee_id);
            let employee = match position {
                Some(pos) => &mut employees[pos],
                None => {
                    let mut employee =
                        Employee::new(employee_id, names.get(idx).unwrap_or(""), name);
                    employee.cost_center = cost_centers.get(idx).map(ToOwned::to_owned);
                    employees.push(employee);
                    let last = employees.len() - 1;
                    &mut employees[last]
                }
            };
            employee.set_weight(activity, weight);
        }

        Ok(SectionRoster {
            name: name.to_string(),
            activities: catalog,
            employees,
        })
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

/// A single section's roster: the unit of quota computation and assignment.
/// Sections never constrain each other.
#[derive(Debug, Clone)]
pub struct SectionRoster {
    pub name: String,
    /// Activity catalog discovered from input, in first-appearance order.
    pub activities: Vec<String>,
    /// Employees in input order.
    pub employees: Vec<Employee>,
}

impl SectionRoster {
    pub fn headcount(&self) -> usize {
        self.employees.len()
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    pub fn activity_index(&self, activity: &str) -> Option<usize> {
        self.activities.iter().position(|a| a == activity)
    }
}
