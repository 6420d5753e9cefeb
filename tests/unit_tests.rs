// Unit tests for mentor match

use mentor_match::core::{
    assign, build_matrix, exact_eq, normalize_list, normalize_text, score, MatchError, Similarity,
};
use mentor_match::models::{
    Axis, MatchConfig, Mentee, Mentor, PolicyKind, PriorityOrder, RawMentee, RawMentor, Strategy,
};

fn mentor(name: &str, department: &str, category: &str, role: &str) -> Mentor {
    RawMentor {
        name: name.to_string(),
        department: department.to_string(),
        company_category: category.to_string(),
        job_role: role.to_string(),
        ..Default::default()
    }
    .normalize()
}

fn mentee(name: &str, department: &str, choices: [&str; 3], role: &str) -> Mentee {
    RawMentee {
        name: name.to_string(),
        department: department.to_string(),
        industry_choices: choices.map(String::from),
        job_role: role.to_string(),
        ..Default::default()
    }
    .normalize()
}

fn category_config(strategy: Strategy) -> MatchConfig {
    MatchConfig::new(80, PriorityOrder::default(), strategy)
        .unwrap()
        .with_policy(PolicyKind::CategoryCatalogue)
}

#[test]
fn test_department_match_scores_eight() {
    let m = mentor("M1", "Engineering", "", "");
    let t = mentee("T1", "Engineering", ["", "", ""], "");

    let breakdown = score(&m, &t, &category_config(Strategy::Greedy));
    assert_eq!(breakdown.department.points, 8.0);
    assert_eq!(breakdown.total, 8.0);
}

#[test]
fn test_first_choice_industry_scores_sixty_four() {
    let m = mentor("M1", "", "Finance", "");
    let t = mentee("T1", "", ["Finance", "Retail", "Energy"], "");

    let breakdown = score(&m, &t, &category_config(Strategy::Greedy));
    assert_eq!(breakdown.industry.points, 64.0);
    assert_eq!(breakdown.industry.matched, vec!["1:finance"]);
}

#[test]
fn test_role_only_match_under_priority_order() {
    let order: PriorityOrder = "role,keyword,industry,interest".parse().unwrap();
    assert_eq!(order.weight(Axis::Role), 4.0);
    assert_eq!(order.weight(Axis::Keyword), 3.0);
    assert_eq!(order.weight(Axis::Industry), 2.0);
    assert_eq!(order.weight(Axis::Interest), 1.0);

    let config = MatchConfig::new(80, order, Strategy::Optimal)
        .unwrap()
        .with_policy(PolicyKind::PriorityWeighted);
    let m = mentor("M1", "", "", "Data Analyst");
    let t = mentee("T1", "", ["", "", ""], "data analyst");

    assert_eq!(score(&m, &t, &config).total, 4.0);
}

#[test]
fn test_three_mentors_two_mentees_greedy() {
    let mentors = vec![
        mentor("M1", "Engineering", "Finance", ""),
        mentor("M2", "Business", "Retail", ""),
        mentor("M3", "Science", "Energy", ""),
    ];
    let mentees = vec![
        mentee("T1", "Engineering", ["Finance", "", ""], ""),
        mentee("T2", "Science", ["Energy", "", ""], ""),
    ];

    let matrix = build_matrix(&mentors, &mentees, &category_config(Strategy::Greedy));
    let pairs = assign(&matrix, Strategy::Greedy);

    assert_eq!(pairs.len(), 2);
    let used: Vec<usize> = pairs.iter().map(|p| p.mentor).collect();
    assert_eq!(used.iter().filter(|&&m| m == 1).count(), 0);
}

#[test]
fn test_empty_mentees_yield_no_pairs() {
    let mentors = vec![mentor("M1", "Engineering", "Finance", "")];

    for strategy in [Strategy::Greedy, Strategy::Optimal] {
        let matrix = build_matrix(&mentors, &[], &category_config(strategy));
        assert!(matrix.is_empty());
        assert!(assign(&matrix, strategy).is_empty());
    }
}

#[test]
fn test_normalize_list_idempotent() {
    let raw = " Finance ; Tech,finance;; Health Care ";
    let once = normalize_list(raw);
    let twice = normalize_list(&once.join(";"));

    assert_eq!(once, vec!["finance", "tech", "health care"]);
    assert_eq!(once, twice);
}

#[test]
fn test_normalize_text() {
    assert_eq!(normalize_text("  Investment\tBanking  "), "investment banking");
    assert_eq!(normalize_text(""), "");
}

#[test]
fn test_exact_equality_symmetric() {
    let pairs = [("finance", "finance"), ("finance", "tech"), ("", "finance")];
    for (a, b) in pairs {
        assert_eq!(exact_eq(a, b), exact_eq(b, a));
    }
    assert!(!exact_eq("", ""));
}

#[test]
fn test_fuzzy_equality() {
    let similarity = Similarity::default();

    assert!(similarity.fuzzy_eq("software engineer", "software engineer", 100));
    assert!(!similarity.fuzzy_eq("", "", 0));
    assert!(!similarity.fuzzy_eq("analyst", "designer", 80));
}

#[cfg(feature = "fuzzy")]
#[test]
fn test_token_sort_ignores_word_order() {
    assert!(Similarity::TokenSort.fuzzy_eq("engineer software", "software engineer", 100));
    assert!(!Similarity::Exact.fuzzy_eq("engineer software", "software engineer", 100));
}

#[test]
fn test_invalid_configuration() {
    assert!(matches!(
        "industry,role,interest".parse::<PriorityOrder>(),
        Err(MatchError::InvalidPriorityOrder(_))
    ));
    assert!(matches!(
        "industry,role,interest,salary".parse::<PriorityOrder>(),
        Err(MatchError::InvalidPriorityOrder(_))
    ));
    assert!(matches!(
        MatchConfig::new(101, PriorityOrder::default(), Strategy::Optimal),
        Err(MatchError::ThresholdOutOfRange(101))
    ));
    assert!(matches!("hungarian".parse::<Strategy>(), Err(MatchError::UnknownOption(_))));
}
