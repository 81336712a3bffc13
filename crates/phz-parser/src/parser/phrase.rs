use phz_scanner::TokenKind;
use serde::Serialize;

/// Composite syntax node kinds.
///
/// Names follow the established PHP language-server vocabulary so tree
/// shapes read the same as in other PHP tooling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PhraseKind {
    Script,
    StatementList,
    Error,
    InlineText,

    // Declarations
    NamespaceDefinition,
    NamespaceUseDeclaration,
    ConstDeclaration,
    ConstElement,
    FunctionDeclaration,
    FunctionDeclarationHeader,
    FunctionDeclarationBody,
    ParameterDeclarationList,
    ParameterDeclaration,
    TypeDeclaration,
    ReturnType,
    ClassDeclaration,
    InterfaceDeclaration,
    TraitDeclaration,
    EnumDeclaration,
    ClassDeclarationHeader,
    ClassBaseClause,
    ClassInterfaceClause,
    ClassDeclarationBody,
    ClassMemberDeclarationList,
    MemberModifierList,
    MethodDeclaration,
    MethodDeclarationHeader,
    MethodDeclarationBody,
    PropertyDeclaration,
    PropertyElement,
    ClassConstDeclaration,
    ClassConstElement,
    TraitUseClause,
    EnumCaseDeclaration,

    // Statements
    CompoundStatement,
    NullStatement,
    ExpressionStatement,
    ReturnStatement,
    EchoStatement,
    IfStatement,
    ElseIfClause,
    ElseClause,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForeachStatement,
    ForeachCollection,
    ForeachKey,
    ForeachValue,
    SwitchStatement,
    CaseStatement,
    BreakStatement,
    ContinueStatement,
    TryStatement,
    CatchClause,
    FinallyClause,
    ThrowStatement,
    GlobalDeclaration,
    FunctionStaticDeclaration,
    StaticVariableDeclaration,
    DeclareStatement,
    NamedLabelStatement,
    GotoStatement,

    // Expressions
    SimpleVariable,
    QualifiedName,
    ConstantAccessExpression,
    SimpleAssignmentExpression,
    CompoundAssignmentExpression,
    SubscriptExpression,
    ArrayCreationExpression,
    ArrayInitialiserList,
    ArrayElement,
    ArrayKey,
    ArrayValue,
    FunctionCallExpression,
    MethodCallExpression,
    ScopedCallExpression,
    MemberName,
    ScopedMemberName,
    PropertyAccessExpression,
    ScopedPropertyAccessExpression,
    ClassConstantAccessExpression,
    ArgumentExpressionList,
    NamedArgument,
    VariadicUnpacking,
    ObjectCreationExpression,
    ClassTypeDesignator,
    AnonymousClassDeclaration,
    AnonymousFunctionCreationExpression,
    AnonymousFunctionHeader,
    AnonymousFunctionUseClause,
    AnonymousFunctionUseVariable,
    ArrowFunction,
    ArrowFunctionHeader,
    ArrowFunctionBody,
    MatchExpression,
    MatchArm,
    ParenthesizedExpression,
    EqualityExpression,
    RelationalExpression,
    ShiftExpression,
    AdditiveExpression,
    MultiplicativeExpression,
    ExponentiationExpression,
    BitwiseExpression,
    LogicalExpression,
    CoalesceExpression,
    TernaryExpression,
    InstanceOfExpression,
    UnaryOpExpression,
    CastExpression,
    PostfixIncrementExpression,
    ShellCommandExpression,
}

impl PhraseKind {
    /// Function-like declarations whose body opens a variable scope.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            PhraseKind::FunctionDeclaration
                | PhraseKind::MethodDeclaration
                | PhraseKind::AnonymousFunctionCreationExpression
                | PhraseKind::ArrowFunction
        )
    }

    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            PhraseKind::ClassDeclaration
                | PhraseKind::InterfaceDeclaration
                | PhraseKind::TraitDeclaration
                | PhraseKind::EnumDeclaration
                | PhraseKind::AnonymousClassDeclaration
        )
    }
}

/// Kind of an arena node: a scanned token or a phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Token(TokenKind),
    Phrase(PhraseKind),
}
