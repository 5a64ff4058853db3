//! End-to-end tests: model building, standardization, and the simplex
//! engine, without the integer layer.

use milx_core::{
    simplex, ConstraintOp, Expression, LinearProgram, Sense, SolveStatus, SolverSettings,
    StandardForm, Term, Variable,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn expr(terms: &[(f64, &Variable)]) -> Expression {
    Expression::new(terms.iter().map(|(c, v)| Term::new(*c, v)).collect())
}

#[test]
fn test_readme_style_mixed_rows() {
    init_logging();

    // min -6x1 + 7x2 + 4x3
    //   2x1 + 5x2 -  x3 <= 18
    //    x1 -  x2 - 2x3 <= -14   (normalized to a >= row)
    //   3x1 + 2x2 + 2x3  = 26
    let vars = vec![
        Variable::new("x1"),
        Variable::new("x2"),
        Variable::new("x3"),
    ];
    let mut program = LinearProgram::new("mixed rows", vars.clone());
    program
        .add_objective(
            Sense::Minimize,
            expr(&[(-6.0, &vars[0]), (7.0, &vars[1]), (4.0, &vars[2])]),
        )
        .unwrap();
    program
        .add_constraint(
            expr(&[(2.0, &vars[0]), (5.0, &vars[1]), (-1.0, &vars[2])]),
            ConstraintOp::Le,
            18.0,
        )
        .unwrap();
    program
        .add_constraint(
            expr(&[(1.0, &vars[0]), (-1.0, &vars[1]), (-2.0, &vars[2])]),
            ConstraintOp::Le,
            -14.0,
        )
        .unwrap();
    program
        .add_constraint(
            expr(&[(3.0, &vars[0]), (2.0, &vars[1]), (2.0, &vars[2])]),
            ConstraintOp::Eq,
            26.0,
        )
        .unwrap();

    let mut scf = StandardForm::from_program(&program).unwrap();
    simplex::solve(&mut scf, &SolverSettings::default()).unwrap();

    assert_eq!(scf.status, SolveStatus::Optimal);
    assert!((scf.objective_value - 16.0).abs() < 1e-6);

    let primal = scf.primal.as_ref().unwrap();
    assert!((primal[0] - 3.0).abs() < 1e-6);
    assert!((primal[1]).abs() < 1e-6);
    assert!((primal[2] - 8.5).abs() < 1e-6);
}

#[test]
fn test_five_variable_covering() {
    init_logging();

    // min x1 + 2x2 + 3x3 + x4 + 4x5 over five covering-style rows;
    // the optimum is 10.
    let vars: Vec<Variable> = (1..=5).map(|i| Variable::new(format!("x{i}"))).collect();
    let mut program = LinearProgram::new("five variables", vars.clone());
    program
        .add_objective(
            Sense::Minimize,
            expr(&[
                (1.0, &vars[0]),
                (2.0, &vars[1]),
                (3.0, &vars[2]),
                (1.0, &vars[3]),
                (4.0, &vars[4]),
            ]),
        )
        .unwrap();

    let rows: [(&[(f64, &Variable)], ConstraintOp, f64); 5] = [
        (
            &[
                (1.0, &vars[0]),
                (1.0, &vars[1]),
                (1.0, &vars[2]),
                (1.0, &vars[3]),
                (1.0, &vars[4]),
            ],
            ConstraintOp::Ge,
            10.0,
        ),
        (
            &[(1.0, &vars[0]), (2.0, &vars[1]), (1.0, &vars[2])],
            ConstraintOp::Le,
            8.0,
        ),
        (
            &[(1.0, &vars[1]), (1.0, &vars[3]), (1.0, &vars[4])],
            ConstraintOp::Le,
            7.0,
        ),
        (
            &[(1.0, &vars[0]), (1.0, &vars[2]), (1.0, &vars[4])],
            ConstraintOp::Ge,
            4.0,
        ),
        (
            &[(1.0, &vars[3]), (1.0, &vars[4])],
            ConstraintOp::Le,
            6.0,
        ),
    ];
    for (terms, op, rhs) in rows {
        program.add_constraint(expr(terms), op, rhs).unwrap();
    }

    let mut scf = StandardForm::from_program(&program).unwrap();
    let settings = SolverSettings::default();
    simplex::solve(&mut scf, &settings).unwrap();

    assert_eq!(scf.status, SolveStatus::Optimal);
    assert!((scf.objective_value - 10.0).abs() < 1e-5);

    // Feasibility of the reported point in the equality system.
    let primal = scf.primal.as_ref().unwrap();
    let residual = &scf.constraints * primal - &scf.rhs;
    assert!(residual.amax() < 10.0 * settings.tolerance);
    assert!(primal.iter().all(|&v| v >= -settings.tolerance));
}

#[test]
fn test_redundant_row_does_not_change_optimum() {
    init_logging();

    let build = |redundant: bool| {
        let vars = vec![Variable::new("x1"), Variable::new("x2")];
        let mut program = LinearProgram::new("redundant", vars.clone());
        program
            .add_objective(
                Sense::Maximize,
                expr(&[(5.0, &vars[0]), (4.0, &vars[1])]),
            )
            .unwrap();
        program
            .add_constraint(
                expr(&[(2.0, &vars[0]), (3.0, &vars[1])]),
                ConstraintOp::Le,
                12.0,
            )
            .unwrap();
        program
            .add_constraint(expr(&[(1.0, &vars[0]), (1.0, &vars[1])]), ConstraintOp::Le, 5.0)
            .unwrap();
        if redundant {
            // Dominated by the row above.
            program
                .add_constraint(
                    expr(&[(1.0, &vars[0]), (1.0, &vars[1])]),
                    ConstraintOp::Le,
                    50.0,
                )
                .unwrap();
        }
        let mut scf = StandardForm::from_program(&program).unwrap();
        simplex::solve(&mut scf, &SolverSettings::default()).unwrap();
        assert_eq!(scf.status, SolveStatus::Optimal);
        scf.objective_value
    };

    let plain = build(false);
    let padded = build(true);
    assert!((plain - padded).abs() < 1e-9);
}
