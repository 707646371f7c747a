//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that every console failure is sorted into.

use serde::Serialize;

/// エラー種別の列挙体
///
/// バックエンドとの通信で発生するエラーを、オペレーターが取るべき行動ごとに分類します。
/// HTTP ステータスコードからの分類は [`ErrorKind::from_status`] で行います。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::from_status(403);
/// assert_eq!(kind, ErrorKind::Forbidden);
/// assert_eq!(kind.as_str(), "Forbidden");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// セッション切れ: トークンが無い・無効・再試行も失敗（再ログインが必要）
    AuthExpired,
    /// 権限不足: 操作は拒否されたがセッションは維持される
    Forbidden,
    /// 対象が存在しない: 状態は変化しない
    NotFound,
    /// サーバーエラー (5xx): 一時的な障害、手動で再試行可能
    ServerError,
    /// 入力エラー: バックエンドまたはクライアント側の検証に失敗
    Validation,
    /// ネットワーク障害またはその他の不明なエラー
    NetworkOrUnknown,
}

impl ErrorKind {
    /// HTTP ステータスコードから種別を判定
    ///
    /// ## Arguments
    /// * `status` - レスポンスの HTTP ステータスコード
    ///
    /// ## Returns
    /// 2xx/3xx など失敗を表さないコードは `NetworkOrUnknown` になります。
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::from_status(401), ErrorKind::AuthExpired);
    /// assert_eq!(ErrorKind::from_status(502), ErrorKind::ServerError);
    /// assert_eq!(ErrorKind::from_status(422), ErrorKind::Validation);
    /// ```
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::AuthExpired,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            500..=599 => ErrorKind::ServerError,
            400..=499 => ErrorKind::Validation,
            _ => ErrorKind::NetworkOrUnknown,
        }
    }

    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::AuthExpired.as_str(), "Session Expired");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AuthExpired => "Session Expired",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::ServerError => "Server Error",
            ErrorKind::Validation => "Validation Error",
            ErrorKind::NetworkOrUnknown => "Network Error",
        }
    }

    /// 再ログインが必要かどうか
    ///
    /// `AuthExpired` のみ `true` を返します。
    #[inline]
    pub const fn requires_reauth(&self) -> bool {
        matches!(self, ErrorKind::AuthExpired)
    }

    /// 一時的なエラーかどうかを判定
    ///
    /// 同じ操作を後で再実行すれば成功する可能性があるものは `true` を返します。
    #[inline]
    pub const fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::ServerError | ErrorKind::NetworkOrUnknown)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::AuthExpired);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Forbidden);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(400), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::ServerError);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServerError);
        assert_eq!(ErrorKind::from_status(302), ErrorKind::NetworkOrUnknown);
    }

    #[test]
    fn test_requires_reauth() {
        assert!(ErrorKind::AuthExpired.requires_reauth());
        assert!(!ErrorKind::Forbidden.requires_reauth());
        assert!(!ErrorKind::ServerError.requires_reauth());
    }

    #[test]
    fn test_is_transient() {
        assert!(ErrorKind::ServerError.is_transient());
        assert!(ErrorKind::NetworkOrUnknown.is_transient());
        assert!(!ErrorKind::Validation.is_transient());
        assert!(!ErrorKind::NotFound.is_transient());
    }
}
