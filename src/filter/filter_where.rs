use super::RestaurantFilter;

/// Renders a `RestaurantFilter` as a parameterized Postgres WHERE clause.
pub struct FilterWhere {
    param_values: Vec<String>,
    param_index: usize,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    /// Returns the clause body (without `WHERE`) and its bind values in order.
    pub fn generate(filter: &RestaurantFilter, starting_param_index: usize) -> (String, Vec<String>) {
        let mut filter_where = Self::new(starting_param_index);
        filter_where.build(filter)
    }

    fn build(&mut self, filter: &RestaurantFilter) -> (String, Vec<String>) {
        if let Some(cuisine) = &filter.cuisine {
            let p = self.param(contains_pattern(cuisine));
            self.conditions.push(format!("\"cuisine\" ILIKE {}", p));
        }
        if let Some(diet) = &filter.diet {
            let p = self.param(contains_pattern(diet));
            self.conditions
                .push(format!("EXISTS (SELECT 1 FROM unnest(\"dietary\") AS tag WHERE tag ILIKE {})", p));
        }
        if let Some(location) = &filter.location {
            let p = self.param(contains_pattern(location));
            self.conditions.push(format!("\"location\" ILIKE {}", p));
        }

        let where_clause = if self.conditions.is_empty() {
            "1=1".to_string()
        } else {
            self.conditions.join(" AND ")
        };
        (where_clause, self.param_values.clone())
    }

    fn param(&mut self, value: String) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// `%needle%` with LIKE metacharacters escaped so input matches literally.
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
