use std::fmt::{self, Write};

use crate::core::compose::Activity;
use crate::core::state::NavigatorState;

/// The flat stack, top marked with `>`, popped entries marked `exiting`.
pub fn render_stack<R>(state: &NavigatorState<R>) -> String {
    let mut out = String::from("stack:\n");
    for (position, activity) in state.flat_activities.iter().enumerate() {
        let marker = if position == state.activity_index { '>' } else { ' ' };
        let _ = write!(out, "{} #{} {}", marker, activity.index, activity.pathname);
        if position > state.activity_index {
            out.push_str("  exiting");
        }
        out.push('\n');
    }
    out
}

/// The composed tree, two spaces per level.
pub fn render_tree<R: fmt::Display>(activities: &[Activity<R>]) -> String {
    let mut out = String::from("tree:\n");
    if activities.is_empty() {
        out.push_str("  (empty)\n");
    }
    for activity in activities {
        render_node(&mut out, activity, 1);
    }
    out
}

fn render_node<R: fmt::Display>(out: &mut String, activity: &Activity<R>, level: usize) {
    let _ = write!(
        out,
        "{:indent$}{} <{}> #{}",
        "",
        activity.full_path,
        activity.render,
        activity.index,
        indent = level * 2
    );
    if !activity.is_present {
        out.push_str("  exiting");
    }
    out.push('\n');
    for child in &activity.children {
        render_node(out, child, level + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::reduce;
    use crate::test_support::{funnel_routes, pop, stacked};

    #[test]
    fn test_render_marks_top_and_exiting() {
        let routes = funnel_routes();
        let state = stacked(&routes, &["/", "/funnel/name"]);
        let popped = reduce(&routes, &state, &pop("/funnel/name", "/")).unwrap();

        assert_eq!(
            render_stack(&popped),
            "stack:\n> #0 /\n  #1 /funnel/name  exiting\n"
        );
        assert_eq!(
            render_tree(&popped.activities),
            "tree:\n  / <Main> #0\n  /funnel <Funnel> #1  exiting\n    /funnel/name <FunnelName> #1  exiting\n"
        );
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(render_tree::<&str>(&[]), "tree:\n  (empty)\n");
    }
}
