//! Step-by-step HomeTax (홈택스) filing guides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HOMETAX_URL: &str = "https://www.hometax.go.kr";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideType {
    Vat,
    Withholding,
    Corporate,
}

impl GuideType {
    pub const ALL: [GuideType; 3] = [GuideType::Vat, GuideType::Withholding, GuideType::Corporate];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuideType::Vat => "vat",
            GuideType::Withholding => "withholding",
            GuideType::Corporate => "corporate",
        }
    }
}

impl fmt::Display for GuideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuideType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GuideType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown guide type '{s}' (expected vat|withholding|corporate)"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideStep {
    pub step: u32,
    pub action: &'static str,
    pub details: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingGuide {
    #[serde(rename = "type")]
    pub kind: GuideType,
    pub title: &'static str,
    pub url: &'static str,
    pub required_documents: Vec<&'static str>,
    pub steps: Vec<GuideStep>,
}

/// Number the `(action, details)` pairs from 1.
fn steps(items: &[(&'static str, &'static str)]) -> Vec<GuideStep> {
    items
        .iter()
        .enumerate()
        .map(|(i, &(action, details))| GuideStep {
            step: i as u32 + 1,
            action,
            details,
        })
        .collect()
}

pub fn filing_guide(kind: GuideType) -> FilingGuide {
    match kind {
        GuideType::Vat => vat_guide(),
        GuideType::Withholding => withholding_guide(),
        GuideType::Corporate => corporate_guide(),
    }
}

fn vat_guide() -> FilingGuide {
    FilingGuide {
        kind: GuideType::Vat,
        title: "부가가치세 신고 (홈택스)",
        url: HOMETAX_URL,
        required_documents: vec![
            "매출세금계산서 합계표",
            "매입세금계산서 합계표",
            "신용카드매출전표 등 수령명세서",
            "현금영수증 매출·매입 내역",
            "수출실적명세서 (해당시)",
            "대손세액공제 신고서 (해당시)",
        ],
        steps: steps(&[
            (
                "홈택스 로그인",
                "https://www.hometax.go.kr 접속 → 공동인증서/간편인증으로 로그인",
            ),
            (
                "부가가치세 신고 메뉴 진입",
                "상단 메뉴 [신고/납부] → [세금신고] → [부가가치세] → [일반과세자 신고]",
            ),
            (
                "기본정보 확인",
                "사업자등록번호, 상호, 대표자명, 신고기간 확인. 신고유형(확정/예정) 선택",
            ),
            (
                "매출세액 입력",
                "세금계산서 발급분, 신용카드/현금영수증 발행분, 기타 매출 금액 입력. \
                 [세금계산서 합계표 불러오기] 버튼으로 전자세금계산서 자동 반영",
            ),
            (
                "매입세액 입력",
                "세금계산서 수취분, 신용카드/현금영수증 매입분 입력. \
                 [매입세금계산서 합계표 불러오기]로 자동 반영. 불공제 매입세액 확인",
            ),
            (
                "경감·공제세액 입력",
                "신용카드매출전표 발행 세액공제, 전자신고 세액공제(1만원), \
                 기타 해당 공제항목 입력",
            ),
            (
                "납부(환급)세액 확인",
                "자동 계산된 납부세액 또는 환급세액 확인. \
                 과소신고·무신고 가산세 해당여부 점검",
            ),
            (
                "신고서 제출",
                "[신고서 제출하기] 클릭 → 접수번호 확인. \
                 납부세액이 있으면 [납부하기]에서 즉시 납부 또는 가상계좌 납부",
            ),
        ]),
    }
}

fn withholding_guide() -> FilingGuide {
    FilingGuide {
        kind: GuideType::Withholding,
        title: "원천세 신고 (홈택스)",
        url: HOMETAX_URL,
        required_documents: vec![
            "원천징수이행상황신고서",
            "급여대장 (급여명세서)",
            "소득자별 원천징수영수증",
            "퇴직소득 원천징수영수증 (해당시)",
            "사업소득 원천징수영수증 (해당시)",
        ],
        steps: steps(&[
            (
                "홈택스 로그인",
                "https://www.hometax.go.kr 접속 → 공동인증서/간편인증으로 로그인",
            ),
            (
                "원천세 신고 메뉴 진입",
                "상단 메뉴 [신고/납부] → [세금신고] → [원천세] → [원천세 신고(정기신고)]",
            ),
            (
                "기본정보 입력",
                "사업자등록번호 확인, 귀속연월(급여 지급 월) 선택, \
                 지급연월(실제 지급 월) 선택, 신고구분(원천징수/반기별) 선택",
            ),
            (
                "소득종류별 인원·금액 입력",
                "근로소득: 인원수, 총지급액, 소득세, 지방소득세 입력. \
                 사업소득(3.3%): 해당시 인원수, 총지급액, 소득세, 지방소득세 입력. \
                 퇴직소득, 기타소득 등 해당항목 입력",
            ),
            (
                "환급신청 확인 (해당시)",
                "연말정산 환급액이 있는 경우, 조정환급액 입력. \
                 당월 원천세에서 차감 또는 환급 신청",
            ),
            (
                "납부세액 확인 및 제출",
                "총 납부세액 확인 → [신고서 제출하기] 클릭 → 접수번호 확인. \
                 매월 10일까지 신고·납부 완료 필수 (공휴일 시 다음 영업일)",
            ),
            (
                "납부",
                "[납부하기] → 전자납부(계좌이체) 또는 가상계좌 납부. \
                 지방소득세는 위택스(https://www.wetax.go.kr)에서 별도 신고·납부",
            ),
        ]),
    }
}

fn corporate_guide() -> FilingGuide {
    FilingGuide {
        kind: GuideType::Corporate,
        title: "법인세 신고 (홈택스)",
        url: HOMETAX_URL,
        required_documents: vec![
            "재무상태표 (대차대조표)",
            "손익계산서",
            "이익잉여금처분계산서",
            "세무조정계산서",
            "법인세 과세표준 및 세액신고서",
            "주요 세무조정 명세서 (감가상각비, 접대비, 기부금 등)",
            "주주명부 및 지분변동명세서",
            "특수관계인 거래명세서 (해당시)",
        ],
        steps: steps(&[
            (
                "홈택스 로그인",
                "https://www.hometax.go.kr 접속 → 법인 공동인증서로 로그인",
            ),
            (
                "법인세 신고 메뉴 진입",
                "상단 메뉴 [신고/납부] → [세금신고] → [법인세] → [법인세 신고]",
            ),
            (
                "기본사항 입력",
                "사업자등록번호, 법인명, 사업연도(결산기간), \
                 법인유형(중소기업/일반법인), 업종코드 확인",
            ),
            (
                "재무제표 입력",
                "재무상태표, 손익계산서 금액 입력. \
                 이카운트 등 회계프로그램에서 표준재무제표 XML 변환 후 업로드 가능",
            ),
            (
                "세무조정 입력",
                "익금산입·손금불산입 항목 입력 (접대비한도초과, 감가상각비 시인부족 등). \
                 손금산입·익금불산입 항목 입력. 소득금액조정합계표 작성",
            ),
            (
                "과세표준 및 세액 계산",
                "과세표준 = 각사업연도소득 - 이월결손금 - 비과세소득 - 소득공제. \
                 세율 적용: 2억 이하 10%, 2~200억 20%, 200~3000억 22%, 3000억 초과 25%",
            ),
            (
                "세액공제·감면 입력",
                "중소기업 세액감면, 연구인력개발비 세액공제, \
                 고용증대 세액공제 등 해당 항목 입력",
            ),
            (
                "기납부세액 입력",
                "중간예납세액, 수시부과세액, 원천징수세액 입력. \
                 차감납부세액 = 산출세액 - 세액공제 - 기납부세액",
            ),
            (
                "첨부서류 업로드",
                "세무조정계산서, 재무제표, 주주명부 등 필수 첨부서류 PDF/XML 업로드",
            ),
            (
                "신고서 제출 및 납부",
                "[신고서 제출하기] 클릭 → 접수번호 확인. \
                 3월 31일까지 신고·납부 완료 (12월 결산법인 기준). \
                 지방소득세는 4월 30일까지 위택스에서 별도 신고·납부",
            ),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_type_parsing() {
        assert_eq!("vat".parse::<GuideType>().unwrap(), GuideType::Vat);
        assert_eq!("corporate".parse::<GuideType>().unwrap(), GuideType::Corporate);
        assert!("income".parse::<GuideType>().is_err());
    }

    #[test]
    fn test_step_counts_and_numbering() {
        assert_eq!(filing_guide(GuideType::Vat).steps.len(), 8);
        assert_eq!(filing_guide(GuideType::Withholding).steps.len(), 7);

        let corporate = filing_guide(GuideType::Corporate);
        assert_eq!(corporate.steps.len(), 10);
        let numbers: Vec<u32> = corporate.steps.iter().map(|s| s.step).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_guide_starts_with_login() {
        for kind in GuideType::ALL {
            let guide = filing_guide(kind);
            assert_eq!(guide.kind, kind);
            assert_eq!(guide.url, HOMETAX_URL);
            assert_eq!(guide.steps[0].action, "홈택스 로그인");
            assert!(!guide.required_documents.is_empty());
        }
    }

    #[test]
    fn test_multi_part_details_joined() {
        let vat = filing_guide(GuideType::Vat);
        assert_eq!(
            vat.steps[3].details,
            "세금계산서 발급분, 신용카드/현금영수증 발행분, 기타 매출 금액 입력. \
             [세금계산서 합계표 불러오기] 버튼으로 전자세금계산서 자동 반영"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(filing_guide(GuideType::Withholding)).unwrap();
        assert_eq!(json["type"], "withholding");
        assert_eq!(json["title"], "원천세 신고 (홈택스)");
        assert!(json["requiredDocuments"].is_array());
        assert_eq!(json["steps"][0]["step"], 1);
    }
}
