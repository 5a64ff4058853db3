//! Parser for a small declarative model-file subset.
//!
//! Recognized lines, each terminated by `;`:
//!
//! ```text
//! var NAME [>= 0];
//! maximize [LABEL:] EXPR;
//! minimize [LABEL:] EXPR;
//! subject to [LABEL:] EXPR (<=|>=|=) NUMBER;
//! ```
//!
//! Expressions are sums of signed `COEF * NAME`, `COEF NAME`, or bare
//! `NAME` terms. Lines starting with `#` and lines that match none of the
//! forms above are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use milx_core::{ConstraintOp, Expression, LinearProgram, Sense, Term, Variable};

/// Parse a model file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<LinearProgram> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    parse_reader(file, &path.display().to_string())
}

/// Parse a model from any reader; `name` becomes the program description.
pub fn parse_reader(reader: impl Read, name: &str) -> Result<LinearProgram> {
    let mut var_names: Vec<String> = Vec::new();
    let mut sense = Sense::Minimize;
    let mut objective_text: Option<String> = None;
    let mut constraint_texts: Vec<(String, ConstraintOp, f64)> = Vec::new();

    for line in BufReader::new(reader).lines() {
        let line = line.context("read error")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.trim_end_matches(';').trim();
        let lower = line.to_lowercase();

        if lower.starts_with("var ") {
            // Take the name from the original line to preserve its case.
            if let Some(name) = line["var ".len()..].split_whitespace().next() {
                var_names.push(name.to_string());
            }
            continue;
        }

        if lower.starts_with("maximize") || lower.starts_with("minimize") {
            if lower.starts_with("maximize") {
                sense = Sense::Maximize;
            }
            let body = match line.find(':') {
                Some(colon) => &line[colon + 1..],
                None => match line.find(' ') {
                    Some(space) => &line[space + 1..],
                    None => "",
                },
            };
            objective_text = Some(body.trim().to_string());
            continue;
        }

        if lower.starts_with("subject to") {
            let mut body = line["subject to".len()..].trim();
            if let Some(colon) = body.find(':') {
                body = body[colon + 1..].trim();
            }
            if let Some(parsed) = split_constraint(body)? {
                constraint_texts.push(parsed);
            }
            continue;
        }
        // Anything else is ignored.
    }

    let variables: Vec<Variable> = var_names.iter().map(|n| Variable::new(n.as_str())).collect();
    let mut program = LinearProgram::new(name, variables.clone());

    if let Some(text) = objective_text {
        let expression = parse_expression(&text, &variables)?;
        program.add_objective(sense, expression)?;
    }
    for (lhs, op, rhs) in constraint_texts {
        let expression = parse_expression(&lhs, &variables)?;
        program.add_constraint(expression, op, rhs)?;
    }

    Ok(program)
}

/// Split a constraint body into (lhs, operator, rhs). Returns `None` when
/// no comparison operator is present.
fn split_constraint(body: &str) -> Result<Option<(String, ConstraintOp, f64)>> {
    for (token, op) in [
        ("<=", ConstraintOp::Le),
        (">=", ConstraintOp::Ge),
        ("=", ConstraintOp::Eq),
    ] {
        if let Some(position) = body.find(token) {
            let lhs = body[..position].trim().to_string();
            let rhs_text = body[position + token.len()..].trim();
            let rhs: f64 = rhs_text
                .parse()
                .with_context(|| format!("invalid right-hand side {rhs_text:?}"))?;
            return Ok(Some((lhs, op, rhs)));
        }
    }
    Ok(None)
}

/// Parse a sum of signed terms against the declared variables.
fn parse_expression(text: &str, variables: &[Variable]) -> Result<Expression> {
    let mut terms = Vec::new();

    // Rewriting "-" as "+-" lets one split handle both signs.
    let rewritten = text.replace('-', "+-");
    for token in rewritten.split('+') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (coefficient, name) = if let Some((coef_text, name)) = token.split_once('*') {
            let coef_text: String = coef_text.split_whitespace().collect();
            let coefficient = match coef_text.as_str() {
                "" => 1.0,
                "-" => -1.0,
                other => other
                    .parse()
                    .with_context(|| format!("invalid coefficient {other:?}"))?,
            };
            (coefficient, name.trim())
        } else {
            let fields: Vec<&str> = token.split_whitespace().collect();
            match fields.as_slice() {
                [single] => match single.strip_prefix('-') {
                    Some(name) => (-1.0, name),
                    None => (1.0, *single),
                },
                [coef_text, name] => {
                    let coefficient: f64 = match *coef_text {
                        "-" => -1.0,
                        other => other
                            .parse()
                            .with_context(|| format!("invalid coefficient {other:?}"))?,
                    };
                    (coefficient, *name)
                }
                _ => continue,
            }
        };

        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let variable = variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| anyhow!("unknown variable {name:?} in expression"))?;
        terms.push(Term::new(coefficient, variable));
    }

    Ok(Expression::new(terms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use milx_mip::{solve, SolveOptions};

    const MODEL: &str = "\
# toy production model
var x1 >= 0;
var x2 >= 0;

maximize profit: 5*x1 + 4*x2;

subject to c1: 2*x1 + 3*x2 <= 12;
subject to c2: x1 + x2 <= 5;
";

    #[test]
    fn test_parse_collects_variables_and_rows() {
        let program = parse_reader(MODEL.as_bytes(), "toy").unwrap();

        // Two declared variables plus one slack per inequality.
        assert_eq!(
            program.variables.iter().filter(|v| !v.is_slack).count(),
            2
        );
        assert_eq!(program.variables.len(), 4);
        assert_eq!(program.sense, Sense::Maximize);
        assert_eq!(program.constraints.as_ref().unwrap().nrows(), 2);
        assert_eq!(program.rhs.as_ref().unwrap()[0], 12.0);
    }

    #[test]
    fn test_parse_and_solve() {
        let program = parse_reader(MODEL.as_bytes(), "toy").unwrap();
        let solution = solve(&program, &SolveOptions::default()).unwrap();
        assert!((solution.objective_value - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_bare_and_signed_terms() {
        let model = "\
var x;
var y;
minimize x - 2*y;
subject to x - y >= 1;
";
        let program = parse_reader(model.as_bytes(), "signs").unwrap();
        let objective = program.objective.as_ref().unwrap();
        assert_eq!(objective[0], 1.0);
        assert_eq!(objective[1], -2.0);

        let constraints = program.constraints.as_ref().unwrap();
        assert_eq!(constraints[(0, 0)], 1.0);
        assert_eq!(constraints[(0, 1)], -1.0);
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let model = "\
set I;
var x;
display x;
minimize cost: x;
subject to floor: x >= 3;
";
        let program = parse_reader(model.as_bytes(), "noise").unwrap();
        assert_eq!(program.variables.iter().filter(|v| !v.is_slack).count(), 1);
        assert_eq!(program.constraint_ops.len(), 1);
    }

    #[test]
    fn test_unknown_variable_is_an_error() {
        let model = "\
var x;
minimize x + z;
";
        assert!(parse_reader(model.as_bytes(), "bad").is_err());
    }

    #[test]
    fn test_equality_constraint() {
        let model = "\
var x;
var y;
minimize x + y;
subject to balance: x + y = 7;
";
        let program = parse_reader(model.as_bytes(), "eq").unwrap();
        assert_eq!(program.constraint_ops[0], ConstraintOp::Eq);
        // No slack for an equality row.
        assert_eq!(program.variables.len(), 2);
    }
}
