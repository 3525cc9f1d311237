//! Prompt texts for the three stages.
//!
//! All budget math and section wording lives in these prompts, not in
//! code: the generated figures are advisory prose. The investor closing
//! disclaimer is likewise a prompt instruction, not a checked invariant.

/// System instruction for the analyzer stage.
pub const ANALYZER_SYSTEM: &str = "You are a meticulous financial analyst AI.";

/// Human template for the analyzer stage.
///
/// Variables: `total_income`, `total_spending`, `net_flow`, `summary`.
pub const ANALYZER_HUMAN: &str = "\
Here is the user's transaction summary:
Total Income: {total_income}
Total Spending: {total_spending}
Net Flow: {net_flow}
{summary}

Write a detailed financial analysis in markdown with these sections, in \
this order: a metrics summary, an executive summary, a category breakdown \
table, notes on recurring charges, and key insights.";

/// System instruction for the budgetor stage.
pub const BUDGETOR_SYSTEM: &str = "You are a friendly budgeting expert.";

/// Human template for the budgetor stage. Variables: `analysis`.
pub const BUDGETOR_HUMAN: &str = "\
Here is the user's financial analysis:

{analysis}

Create a detailed, encouraging budget plan. Allocate income with the \
50/30/20 rule: 50% to needs, 30% to wants, 20% to savings. Present the \
plan as a markdown table with the columns category, actual spending, \
suggested budget, and difference, followed by two or three concrete \
recommendations.";

/// System instruction for the investor stage.
pub const INVESTOR_SYSTEM: &str =
    "You are a financial educator providing beginner-friendly investment advice.";

/// Human template for the investor stage. Variables: `budget`.
pub const INVESTOR_HUMAN: &str = "\
Here is the user's budget plan:

{budget}

Suggest investment options in this order: a high-yield savings account, a \
broad market index fund, and a retirement account. End with one sentence \
stating that this is educational content and not financial advice.";
