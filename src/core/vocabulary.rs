// reference vocabulary for keyword usage: rule-language function names a definition may call
//order is the tie-break order of the report. No bare English words (If, Or, In, Count)
pub const VOCABULARY: &[&str] = &[
    "GetEntityId", "GetEntityName", "GetEntityType", "GetEntityDomain", "GetEntityLevel",
    "GetEntityPath", "GetEntityState", "GetEntityVersion", "GetEntityCreatedDate",
    "GetEntityModifiedDate", "GetEntityCreatedBy", "GetEntityModifiedBy", "GetParentEntityId",
    "GetParentEntityName", "GetParentEntityType", "GetChildEntityIds", "GetChildEntityCount",
    "GetRootEntityId", "GetEntityContext", "GetEntityWorkflowState", "GetAttributeValue",
    "GetAttributeValues", "GetAttributeValueReferenceId", "GetAttributeDisplayValue",
    "GetAttributeLocaleValue", "GetAttributeSourceValue", "GetAttributeUom", "GetAttributeType",
    "GetAttributeDefaultValue", "GetNestedAttributeRows", "GetNestedAttributeRowCount",
    "GetNestedAttributeValue", "GetInheritedAttributeValue", "GetAttributeValueCount",
    "GetAttributeHistory", "SetAttributeValue", "SetAttributeValues",
    "SetAttributeValueReferenceId", "SetAttributeLocaleValue", "SetAttributeUom",
    "SetNestedAttributeValue", "AddNestedAttributeRow", "RemoveNestedAttributeRow",
    "ClearAttributeValue", "CopyAttributeValue", "AppendAttributeValue", "RemoveAttributeValue",
    "IsAttributeValueChanged", "IsAttributeEmpty", "IsAttributeValueNull",
    "IsAttributeReadOnly", "IsAttributeRequired", "IsAttributeInherited",
    "IsAttributeValueValid", "IsNestedAttributeEmpty", "HasAttributeValue",
    "HasNestedAttributeRows", "GetRelationships", "GetRelationshipCount", "GetRelatedEntityIds",
    "GetRelatedEntityNames", "GetRelatedEntityTypes", "GetRelationshipAttributeValue",
    "SetRelationshipAttributeValue", "AddRelationship", "RemoveRelationship", "HasRelationship",
    "IsRelationshipChanged", "GetWhereUsedRelationships", "GetContextValue", "GetContextName",
    "GetContextType", "GetCurrentLocale", "GetDataLocale", "GetUiLocale", "GetCurrentUser",
    "GetCurrentUserId", "GetCurrentUserRole", "GetCurrentUserRoles", "GetCurrentUserEmail",
    "GetCurrentDate", "GetCurrentDateTime", "GetSourceName", "GetChannel", "GetCatalog",
    "GetTaxonomy", "GetClassification", "GetClassificationPath", "IsUserInRole",
    "IsUserInAnyRole", "IsCurrentUser", "IsSystemUser", "IsImportProcess", "IsUiProcess",
    "IsApiProcess", "IsWorkflowActivity", "IsInWorkflow", "IsEntityNew", "IsEntityChanged",
    "IsEntityDeleted", "IsEntityLocked", "IsEntityPublished", "IsEntityOfType", "IsLocale",
    "IsContext", "IsClassifiedUnder", "GetWorkflowName", "GetWorkflowActivity",
    "GetWorkflowActivityAction", "GetWorkflowAssignedUser", "GetWorkflowAssignedRole",
    "GetWorkflowComment", "StartWorkflow", "ResumeWorkflow", "TransitionWorkflow",
    "AssignWorkflowUser", "AssignWorkflowRole", "AddValidationError", "AddValidationWarning",
    "AddValidationInformation", "AddBusinessCondition", "RemoveBusinessCondition",
    "SetBusinessConditionStatus", "GetBusinessConditionStatus", "RaiseError", "RaiseWarning",
    "LogMessage", "SendNotification", "SendEmail", "TrimStart", "TrimEnd", "ToUpper", "ToLower",
    "StartsWith", "EndsWith", "IndexOf", "PadLeft", "PadRight", "RegexMatch", "RegexReplace",
    "IsNullOrEmpty", "IsNullOrWhiteSpace", "Coalesce", "ToNumber", "ToDecimal", "ToInteger",
    "ToString", "ToDate", "ToDateTime", "ToBoolean", "AddDays", "AddMonths", "AddYears",
    "DateDiff", "FormatDate", "IfElse", "NotEquals", "GreaterThan", "LessThan",
    "GreaterThanOrEqual", "LessThanOrEqual", "NotIn", "ForEach", "GetLookupValue",
    "GetLookupValues", "GetLookupDisplayValue", "IsLookupValueValid", "GetReferenceDataValue",
    "GetReferenceDataId", "PublishEntity", "SaveEntity", "CreateEntity", "DeleteEntity",
    "CloneEntity", "MoveEntity", "ReclassifyEntity", "LockEntity", "UnlockEntity",
    "GenerateSequence", "GetNextSequenceValue", "GenerateGuid", "GetMatchScore",
    "FindMatchingEntities", "MergeEntities", "GetEntityDisplayName", "GetEntityExternalId",
    "GetEntityCategory", "GetAttributeGroup", "GetAttributeDataType", "IsAttributeVisible",
    "SetAttributeReadOnly", "SetAttributeVisible", "GetRelationshipDirection",
    "GetRelatedEntityCount", "GetWorkflowActivityStatus", "CompleteWorkflowActivity",
    "GetLookupTableName", "ConvertUom", "ConvertCurrency", "FormatNumber", "ParseDate",
    "GetEntityAuditTrail",
];
