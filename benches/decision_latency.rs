use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use spendguard::domain::{CriticalRules, RuleSet, TagLists, Thresholds, TransactionSnapshot};
use spendguard::evaluator::BudgetSummary;
use spendguard::graph::build_default_graph;
use spendguard::rules::RuleChain;

fn create_ruleset() -> RuleSet {
    let mut limits = BTreeMap::new();
    limits.insert("Transport".to_string(), Decimal::new(5000, 0));
    limits.insert("Food".to_string(), Decimal::new(3000, 0));
    limits.insert("Shopping".to_string(), Decimal::new(2000, 0));
    limits.insert("Entertainment".to_string(), Decimal::new(1500, 0));
    limits.insert("Other".to_string(), Decimal::new(1000, 0));

    RuleSet {
        critical_rules: CriticalRules {
            block_if_budget_exceeded: true,
            must_not_exceed_total_budget: true,
            must_not_exceed_category_budget: true,
        },
        thresholds: Thresholds {
            min_amount: Decimal::ZERO,
            max_total_budget: Decimal::new(10000, 0),
            max_category_budget: limits,
        },
        lists: TagLists {
            blacklist: HashSet::from(["fraud".to_string(), "suspicious".to_string()]),
            whitelist: HashSet::from(["verified".to_string()]),
        },
    }
}

fn create_test_txn(amount: i64, tags: &[&str]) -> TransactionSnapshot {
    TransactionSnapshot::new(Decimal::new(amount, 0), "Transport")
        .with_tags(tags.iter().copied())
        .with_category_total(Decimal::new(1200, 0))
        .with_total_spent(Decimal::new(4300, 0))
}

fn bench_chain_approved(c: &mut Criterion) {
    let chain = RuleChain::from_ruleset(&create_ruleset());
    let txn = create_test_txn(500, &["commute", "verified"]);

    c.bench_function("chain_evaluate_approved", |b| {
        b.iter(|| chain.evaluate(black_box(&txn)))
    });
}

fn bench_chain_blacklisted(c: &mut Criterion) {
    let chain = RuleChain::from_ruleset(&create_ruleset());
    let txn = create_test_txn(500, &["gift", "suspicious"]);

    c.bench_function("chain_evaluate_blacklisted", |b| {
        b.iter(|| chain.evaluate(black_box(&txn)))
    });
}

fn bench_chain_warned(c: &mut Criterion) {
    let chain = RuleChain::from_ruleset(&create_ruleset());
    let txn = create_test_txn(3000, &[]);

    c.bench_function("chain_evaluate_warned", |b| {
        b.iter(|| chain.evaluate(black_box(&txn)))
    });
}

fn bench_chain_compile(c: &mut Criterion) {
    let ruleset = create_ruleset();

    c.bench_function("chain_compile", |b| {
        b.iter(|| RuleChain::from_ruleset(black_box(&ruleset)))
    });
}

fn bench_budget_summary(c: &mut Criterion) {
    let ruleset = create_ruleset();
    let txn = create_test_txn(500, &[]);

    c.bench_function("budget_summary", |b| {
        b.iter(|| BudgetSummary::compute(black_box(&ruleset), black_box(&txn)))
    });
}

fn bench_classify(c: &mut Criterion) {
    let graph = build_default_graph();

    c.bench_function("category_for_store_hit", |b| {
        b.iter(|| graph.category_for_store(black_box("Starbucks")))
    });

    c.bench_function("category_for_store_miss", |b| {
        b.iter(|| graph.category_for_store(black_box("Unknown Shop")))
    });

    c.bench_function("stores_in_category", |b| {
        b.iter(|| graph.stores_in_category(black_box("Food")))
    });
}

criterion_group!(
    benches,
    bench_chain_approved,
    bench_chain_blacklisted,
    bench_chain_warned,
    bench_chain_compile,
    bench_budget_summary,
    bench_classify,
);
criterion_main!(benches);
