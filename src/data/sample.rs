//! # Sample Data
//!
//! A small fixed set of brand posts, used when no collected data is given.

use super::record::Record;
use chrono::{DateTime, Utc};

/// 2024-01-15 00:00:00 UTC
const SAMPLE_DAY_START: i64 = 1_705_276_800;

const SAMPLE_POSTS: &[(&str, &str, (i64, i64), &str)] = &[
    ("1", "Adorei o novo iPhone! A câmera está incrível e a bateria dura muito mais.", (10, 30), "user1"),
    ("2", "iPhone muito caro para o que oferece. Não vale o preço.", (11, 45), "user2"),
    ("3", "Design do iPhone continua lindo, mas esperava mais inovações.", (12, 15), "user3"),
    ("4", "Nike sempre inovando! Os novos tênis são perfeitos para corrida.", (13, 20), "user4"),
    ("5", "Nike decepcionou com a qualidade dos materiais. Esperava melhor.", (14, 10), "user5"),
    ("6", "Produto Nike ok, mas o atendimento ao cliente precisa melhorar.", (15, 30), "user6"),
    ("7", "McDonald's lançou um novo hambúrguer e está delicioso!", (16, 45), "user7"),
    ("8", "McDonald's muito caro para a qualidade da comida.", (17, 20), "user8"),
    ("9", "McDonald's é prático, mas não é a melhor opção de comida.", (18, 0), "user9"),
    ("10", "Netflix tem os melhores documentários! Recomendo muito.", (19, 15), "user10"),
];

/// Sample records in Portuguese, all posted on 2024-01-15
pub fn sample_records() -> Vec<Record> {
    SAMPLE_POSTS
        .iter()
        .map(|(id, text, (hour, minute), author)| {
            let secs = SAMPLE_DAY_START + hour * 3600 + minute * 60;
            let timestamp = DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default();
            Record::new(*id, *text)
                .with_timestamp(timestamp)
                .with_author(*author)
        })
        .collect()
}
