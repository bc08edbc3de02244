use super::*;
use crate::error::Res;

// 対局ルール (JSONから読み込み可能 未指定の項目はデフォルト値)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub red5: usize,                    // 各数牌の赤5の枚数 (0~4)
    pub initial_score: Point,           // 配給原点
    pub allow_multi_ron: bool,          // ダブロン・トリロンの有無 (falseの場合は頭ハネ)
    pub ura_dora_for_all_winners: bool, // 複数和了時に全員へ裏ドラを適用 (falseの場合は上家取りの和了者のみ)
    pub sky_mode: bool,                 // 青天井
    pub open_tanyao: bool,              // 喰いタン
    pub base_turn_time_ms: u64,         // 1操作ごとの基本持ち時間
    pub bonus_turn_time_ms: u64,        // 局ごとの追加持ち時間
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            red5: 1,
            initial_score: 25000,
            allow_multi_ron: true,
            ura_dora_for_all_winners: true,
            sky_mode: false,
            open_tanyao: true,
            base_turn_time_ms: 5000,
            bonus_turn_time_ms: 20000,
        }
    }
}

impl Rule {
    pub fn from_json(s: &str) -> Res<Self> {
        let rule: Rule = serde_json::from_str(s)?;
        if rule.red5 > TILE {
            return Err(crate::error::MahjongError::Config {
                message: format!("red5 must be <= {}: {}", TILE, rule.red5),
            });
        }
        Ok(rule)
    }

    pub fn scoring_options(&self) -> ScoringOptions {
        ScoringOptions {
            sky_mode: self.sky_mode,
            open_tanyao: self.open_tanyao,
        }
    }
}

// 役判定・点数計算に影響するオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOptions {
    pub sky_mode: bool,
    pub open_tanyao: bool,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Rule::default().scoring_options()
    }
}

#[test]
fn test_rule_from_json() {
    let rule = Rule::from_json(r#"{"allow_multi_ron": false, "sky_mode": true}"#).unwrap();
    assert!(!rule.allow_multi_ron);
    assert!(rule.sky_mode);
    assert_eq!(rule.red5, 1);
    assert_eq!(rule.initial_score, 25000);
    assert!(rule.scoring_options().sky_mode);

    assert!(Rule::from_json(r#"{"red5": 5}"#).is_err());
    assert!(Rule::from_json("not json").is_err());
}
