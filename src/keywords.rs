// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-language surface-keyword tables.
//!
//! Alias order matters: matching is first-match, so a longer alias that is
//! also a prefix of a shorter one must come first. Step-keyword aliases
//! that end in a space require a word separator after the keyword; aliases
//! with no trailing space (used by languages that don't use whitespace to
//! separate words) may abut their argument directly.

use std::ops::Deref;

/// The ordered surface aliases for every grammatical concept, for one
/// language.
#[derive(Debug, Clone, Copy)]
pub struct Keywords<'a> {
    pub feature: &'a [&'a str],
    pub background: &'a [&'a str],
    pub rule: &'a [&'a str],
    pub scenario: &'a [&'a str],
    pub scenario_outline: &'a [&'a str],
    pub examples: &'a [&'a str],
    pub given: &'a [&'a str],
    pub when: &'a [&'a str],
    pub then: &'a [&'a str],
    pub and: &'a [&'a str],
    pub but: &'a [&'a str],
}

impl<'a> Keywords<'a> {
    /// All aliases across every concept, for diagnostics that need to probe
    /// "does this line start with *any* known keyword".
    pub fn all(&self) -> Vec<&'a str> {
        let mut v: Vec<&'a str> = [
            self.feature,
            self.background,
            self.rule,
            self.scenario,
            self.scenario_outline,
            self.examples,
            self.given,
            self.when,
            self.then,
            self.and,
            self.but,
        ]
        .iter()
        .flat_map(|s| s.iter().map(Deref::deref))
        .collect();
        v.sort_unstable();
        v
    }
}

impl<'a> Default for Keywords<'a> {
    fn default() -> Self {
        EN
    }
}

macro_rules! keywords {
    ($name:ident {
        feature: [$($feature:expr),* $(,)?],
        background: [$($background:expr),* $(,)?],
        rule: [$($rule:expr),* $(,)?],
        scenario: [$($scenario:expr),* $(,)?],
        scenario_outline: [$($scenario_outline:expr),* $(,)?],
        examples: [$($examples:expr),* $(,)?],
        given: [$($given:expr),* $(,)?],
        when: [$($when:expr),* $(,)?],
        then: [$($then:expr),* $(,)?],
        and: [$($and:expr),* $(,)?],
        but: [$($but:expr),* $(,)?] $(,)?
    }) => {
        pub(crate) const $name: Keywords<'static> = Keywords {
            feature: &[$($feature),*],
            background: &[$($background),*],
            rule: &[$($rule),*],
            scenario: &[$($scenario),*],
            scenario_outline: &[$($scenario_outline),*],
            examples: &[$($examples),*],
            given: &[$($given),*],
            when: &[$($when),*],
            then: &[$($then),*],
            and: &[$($and),*],
            but: &[$($but),*],
        };
    };
}

keywords!(EN {
    feature: ["Feature"],
    background: ["Background"],
    rule: ["Rule"],
    scenario: ["Scenario", "Example"],
    scenario_outline: ["Scenario Outline", "Scenario Template"],
    examples: ["Examples", "Scenarios"],
    given: ["Given "],
    when: ["When "],
    then: ["Then "],
    and: ["And "],
    but: ["But "],
});

keywords!(DE {
    feature: ["Funktionalität", "Funktion"],
    background: ["Grundlage", "Hintergrund"],
    rule: ["Rule", "Regel"],
    scenario: ["Szenario", "Beispiel"],
    scenario_outline: ["Szenariogrundriss", "Szenarien"],
    examples: ["Beispiele"],
    given: ["Angenommen ", "Gegeben sei ", "Gegeben seien "],
    when: ["Wenn "],
    then: ["Dann "],
    and: ["Und "],
    but: ["Aber "],
});

keywords!(FR {
    feature: ["Fonctionnalité"],
    background: ["Contexte"],
    rule: ["Règle"],
    scenario: ["Scénario", "Exemple"],
    scenario_outline: ["Plan du scénario", "Plan du Scénario"],
    examples: ["Exemples"],
    given: [
        "Soit ", "Etant donné ", "Etant donné que ", "Etant donnée ", "Etant données ",
        "Étant donné ", "Étant donné que ", "Étant données ", "Étant donnée "
    ],
    when: ["Quand ", "Lorsque ", "Lorsqu'"],
    then: ["Alors "],
    and: ["Et "],
    but: ["Mais "],
});

keywords!(ES {
    feature: ["Característica"],
    background: ["Antecedentes"],
    rule: ["Regla"],
    scenario: ["Escenario"],
    scenario_outline: ["Esquema del escenario"],
    examples: ["Ejemplos"],
    given: ["Dado ", "Dada ", "Dados ", "Dadas "],
    when: ["Cuando "],
    then: ["Entonces "],
    and: ["Y "],
    but: ["Pero "],
});

keywords!(IT {
    feature: ["Funzionalità"],
    background: ["Contesto"],
    rule: ["Regola"],
    scenario: ["Scenario"],
    scenario_outline: ["Schema dello scenario"],
    examples: ["Esempi"],
    given: ["Dato ", "Data ", "Dati ", "Date "],
    when: ["Quando "],
    then: ["Allora "],
    and: ["E "],
    but: ["Ma "],
});

keywords!(PT {
    feature: ["Funcionalidade"],
    background: ["Contexto", "Cenário de Fundo", "Fundo"],
    rule: ["Regra"],
    scenario: ["Cenário", "Cenario"],
    scenario_outline: ["Esquema do Cenário", "Esquema do Cenario"],
    examples: ["Exemplos", "Cenários", "Cenarios"],
    given: ["Dado ", "Dada ", "Dados ", "Dadas "],
    when: ["Quando "],
    then: ["Então ", "Entao "],
    and: ["E "],
    but: ["Mas "],
});

keywords!(NL {
    feature: ["Functionaliteit"],
    background: ["Achtergrond"],
    rule: ["Regel"],
    scenario: ["Scenario"],
    scenario_outline: ["Abstract Scenario"],
    examples: ["Voorbeelden"],
    given: ["Gegeven ", "Stel "],
    when: ["Als "],
    then: ["Dan "],
    and: ["En "],
    but: ["Maar "],
});

keywords!(SV {
    feature: ["Egenskap"],
    background: ["Bakgrund"],
    rule: ["Regel"],
    scenario: ["Scenario"],
    scenario_outline: ["Abstrakt Scenario", "Scenariomall"],
    examples: ["Exempel"],
    given: ["Givet "],
    when: ["När "],
    then: ["Så "],
    and: ["Och "],
    but: ["Men "],
});

keywords!(RU {
    feature: ["Функция", "Функциональность"],
    background: ["Предыстория", "Контекст"],
    rule: ["Правило"],
    scenario: ["Сценарий", "Пример"],
    scenario_outline: ["Структура сценария"],
    examples: ["Примеры"],
    given: ["Допустим ", "Дано ", "Пусть "],
    when: ["Если ", "Когда "],
    then: ["То ", "Тогда "],
    and: ["И "],
    but: ["Но ", "А "],
});

keywords!(PL {
    feature: ["Właściwość", "Funkcja"],
    background: ["Założenia"],
    rule: ["Reguła"],
    scenario: ["Scenariusz"],
    scenario_outline: ["Szablon scenariusza"],
    examples: ["Przykłady"],
    given: ["Zakładając ", "Zakładając, że ", "Mając "],
    when: ["Jeżeli ", "Jeśli "],
    then: ["Wtedy "],
    and: ["Oraz ", "I "],
    but: ["Ale "],
});

keywords!(JA {
    feature: ["機能"],
    background: ["背景"],
    rule: ["ルール"],
    scenario: ["シナリオ"],
    scenario_outline: ["シナリオアウトライン", "シナリオテンプレート", "シナリオテンプレ"],
    examples: ["例", "サンプル"],
    given: ["前提"],
    when: ["もし"],
    then: ["ならば"],
    and: ["かつ"],
    but: ["但し", "ただし"],
});

keywords!(ZH_CN {
    feature: ["功能"],
    background: ["背景"],
    rule: ["规则"],
    scenario: ["场景", "剧本"],
    scenario_outline: ["场景大纲", "剧本大纲"],
    examples: ["例子"],
    given: ["假如", "假设", "假定"],
    when: ["当"],
    then: ["那么"],
    and: ["而且", "并且", "同时"],
    but: ["但是"],
});

keywords!(KO {
    feature: ["기능"],
    background: ["배경"],
    rule: ["규칙"],
    scenario: ["시나리오"],
    scenario_outline: ["시나리오 개요"],
    examples: ["예"],
    given: ["조건", "먼저"],
    when: ["만일", "만약"],
    then: ["그러면"],
    and: ["그리고"],
    but: ["하지만", "단"],
});

/// Returns the keyword table for an IETF-like language tag (`en`, `de`,
/// `zh-CN`, ...), or `None` if unsupported.
pub fn lookup(language: &str) -> Option<Keywords<'static>> {
    Some(match language {
        "en" => EN,
        "de" => DE,
        "fr" => FR,
        "es" => ES,
        "it" => IT,
        "pt" => PT,
        "nl" => NL,
        "sv" => SV,
        "ru" => RU,
        "pl" => PL,
        "ja" => JA,
        "zh-CN" => ZH_CN,
        "ko" => KO,
        _ => return None,
    })
}

/// Whether `language` has a keyword table.
pub fn has_language(language: &str) -> bool {
    lookup(language).is_some()
}
